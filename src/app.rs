use iced::widget::container as container_widget;
use iced::widget::{container, Canvas};
use iced::{theme, window, Background, Color, Command, Element, Length, Settings, Theme};

use buck_boost_waveforms::plot::Plot;

use crate::plot_view::PlotView;

#[derive(Debug, Clone)]
pub enum Message {}

pub struct PlotWindow {
    plot: Plot,
}

impl PlotWindow {
    pub fn settings(plot: Plot) -> Settings<Plot> {
        let size = plot.window_size;
        Settings {
            window: window::Settings {
                size,
                ..window::Settings::default()
            },
            ..Settings::with_flags(plot)
        }
    }
}

impl iced::Application for PlotWindow {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = Plot;

    fn new(plot: Plot) -> (Self, Command<Self::Message>) {
        (PlotWindow { plot }, Command::none())
    }

    fn title(&self) -> String {
        self.plot.title.clone()
    }

    fn update(&mut self, message: Self::Message) -> Command<Self::Message> {
        match message {}
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let canvas = Canvas::new(PlotView { plot: &self.plot })
            .width(Length::Fill)
            .height(Length::Fill);

        container(canvas)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(8)
            .style(theme::Container::from(body_style))
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn body_style(_theme: &Theme) -> container_widget::Appearance {
    container_widget::Appearance {
        background: Some(Background::Color(Color::from_rgb8(236, 238, 242))),
        ..Default::default()
    }
}
