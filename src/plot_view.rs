use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{Frame, Geometry, LineDash, Path, Program, Stroke, Text};
use iced::{mouse, Color, Point, Rectangle, Renderer, Size, Theme};

use buck_boost_waveforms::plot::{format_tick, nice_ticks, Bounds, LineStyle, Plot, Rgb};

const INSET_LEFT: f32 = 64.0;
const INSET_RIGHT: f32 = 24.0;
const INSET_TOP: f32 = 48.0;
const INSET_BOTTOM: f32 = 52.0;
const X_TICKS: usize = 10;
const Y_TICKS: usize = 6;

fn color(rgb: Rgb) -> Color {
    Color::from_rgb8(rgb.0, rgb.1, rgb.2)
}

fn color_text() -> Color {
    Color::from_rgb8(40, 40, 46)
}

fn color_grid() -> Color {
    Color::from_rgb8(222, 222, 228)
}

fn line(style: LineStyle, width: f32, rgb: Rgb) -> Stroke<'static> {
    let segments: &'static [f32] = match style {
        LineStyle::Solid => &[],
        LineStyle::Dashed => &[7.0, 4.0],
        LineStyle::Dotted => &[1.5, 3.0],
    };
    Stroke {
        line_dash: LineDash { segments, offset: 0 },
        ..Stroke::default().with_width(width).with_color(color(rgb))
    }
}

/// Maps data coordinates into the inset plot area.
struct Viewport {
    area: Rectangle,
    bounds: Bounds,
}

impl Viewport {
    fn x(&self, x: f64) -> f32 {
        let unit = (x - self.bounds.x_min) / (self.bounds.x_max - self.bounds.x_min);
        self.area.x + unit as f32 * self.area.width
    }

    fn y(&self, y: f64) -> f32 {
        let unit = (y - self.bounds.y_min) / (self.bounds.y_max - self.bounds.y_min);
        self.area.y + self.area.height - unit as f32 * self.area.height
    }

    fn point(&self, x: f64, y: f64) -> Point {
        Point::new(self.x(x), self.y(y))
    }
}

pub struct PlotView<'a> {
    pub plot: &'a Plot,
}

impl<'a, Message> Program<Message, Renderer> for PlotView<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let bg = Path::rectangle(Point::ORIGIN, frame.size());
        frame.fill(&bg, Color::from_rgb8(248, 248, 250));

        let width = frame.size().width;
        let height = frame.size().height;
        let area = Rectangle::new(
            Point::new(INSET_LEFT, INSET_TOP),
            Size::new(
                (width - INSET_LEFT - INSET_RIGHT).max(1.0),
                (height - INSET_TOP - INSET_BOTTOM).max(1.0),
            ),
        );
        let view = Viewport {
            area,
            bounds: self.plot.bounds(),
        };

        frame.fill(&Path::rectangle(area.position(), area.size()), Color::WHITE);
        self.draw_grid(&mut frame, &view);

        for guide in &self.plot.guides {
            let y = view.y(guide.level);
            let path = Path::line(Point::new(area.x, y), Point::new(area.x + area.width, y));
            frame.stroke(&path, line(guide.style, 1.2, guide.color));
        }

        for trace in &self.plot.traces {
            if trace.points.len() < 2 {
                continue;
            }
            let path = Path::new(|builder| {
                for (i, &(x, y)) in trace.points.iter().enumerate() {
                    if i == 0 {
                        builder.move_to(view.point(x, y));
                    } else {
                        builder.line_to(view.point(x, y));
                    }
                }
            });
            frame.stroke(&path, line(LineStyle::Solid, 1.6, trace.color));
        }

        let border = Path::rectangle(area.position(), area.size());
        frame.stroke(&border, Stroke::default().with_width(1.0).with_color(color_text()));

        self.draw_labels(&mut frame, &view);
        self.draw_legend(&mut frame, &view);

        vec![frame.into_geometry()]
    }
}

impl<'a> PlotView<'a> {
    fn draw_grid(&self, frame: &mut Frame, view: &Viewport) {
        let area = view.area;
        let b = view.bounds;

        let x_ticks = nice_ticks(b.x_min, b.x_max, X_TICKS);
        let x_step = tick_step(&x_ticks);
        for x in x_ticks {
            let px = view.x(x);
            let grid = Path::line(Point::new(px, area.y), Point::new(px, area.y + area.height));
            frame.stroke(&grid, Stroke::default().with_width(1.0).with_color(color_grid()));
            frame.fill_text(Text {
                content: format_tick(x, x_step),
                position: Point::new(px, area.y + area.height + 6.0),
                color: color_text(),
                size: 12.0,
                horizontal_alignment: Horizontal::Center,
                vertical_alignment: Vertical::Top,
                ..Text::default()
            });
        }

        let y_ticks = nice_ticks(b.y_min, b.y_max, Y_TICKS);
        let y_step = tick_step(&y_ticks);
        for y in y_ticks {
            let py = view.y(y);
            let grid = Path::line(Point::new(area.x, py), Point::new(area.x + area.width, py));
            frame.stroke(&grid, Stroke::default().with_width(1.0).with_color(color_grid()));
            frame.fill_text(Text {
                content: format_tick(y, y_step),
                position: Point::new(area.x - 6.0, py),
                color: color_text(),
                size: 12.0,
                horizontal_alignment: Horizontal::Right,
                vertical_alignment: Vertical::Center,
                ..Text::default()
            });
        }
    }

    fn draw_labels(&self, frame: &mut Frame, view: &Viewport) {
        let area = view.area;
        frame.fill_text(Text {
            content: self.plot.title.clone(),
            position: Point::new(area.x + area.width / 2.0, 12.0),
            color: color_text(),
            size: 16.0,
            horizontal_alignment: Horizontal::Center,
            vertical_alignment: Vertical::Top,
            ..Text::default()
        });
        frame.fill_text(Text {
            content: self.plot.x_label.clone(),
            position: Point::new(area.x + area.width / 2.0, area.y + area.height + 28.0),
            color: color_text(),
            size: 13.0,
            horizontal_alignment: Horizontal::Center,
            vertical_alignment: Vertical::Top,
            ..Text::default()
        });
        // Canvas text cannot be rotated, so the y label sits above the axis.
        frame.fill_text(Text {
            content: self.plot.y_label.clone(),
            position: Point::new(4.0, area.y - 6.0),
            color: color_text(),
            size: 13.0,
            horizontal_alignment: Horizontal::Left,
            vertical_alignment: Vertical::Bottom,
            ..Text::default()
        });
    }

    fn draw_legend(&self, frame: &mut Frame, view: &Viewport) {
        let entries = self.plot.legend();
        if entries.is_empty() {
            return;
        }
        let row = 18.0;
        let swatch = 26.0;
        let longest = entries.iter().map(|(label, _, _)| label.chars().count()).max().unwrap_or(0);
        let box_width = swatch + 18.0 + longest as f32 * 7.0;
        let box_height = entries.len() as f32 * row + 8.0;
        let origin = Point::new(
            view.area.x + view.area.width - box_width - 8.0,
            view.area.y + 8.0,
        );

        let panel = Path::rectangle(origin, Size::new(box_width, box_height));
        frame.fill(&panel, Color::from_rgba(1.0, 1.0, 1.0, 0.85));
        frame.stroke(&panel, Stroke::default().with_width(1.0).with_color(color_grid()));

        for (i, (label, rgb, style)) in entries.into_iter().enumerate() {
            let y = origin.y + 4.0 + row * (i as f32 + 0.5);
            let sample = Path::line(
                Point::new(origin.x + 6.0, y),
                Point::new(origin.x + 6.0 + swatch, y),
            );
            frame.stroke(&sample, line(style, 2.0, rgb));
            frame.fill_text(Text {
                content: label.to_string(),
                position: Point::new(origin.x + swatch + 12.0, y),
                color: color_text(),
                size: 12.0,
                vertical_alignment: Vertical::Center,
                ..Text::default()
            });
        }
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => b - a,
        _ => 1.0,
    }
}
