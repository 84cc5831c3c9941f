#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

mod catalog;
mod playback;
mod session;
mod settings;
mod ui;

use iced::{color, window};
use ui::app::App;

fn main() -> iced::Result {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(
        if cfg!(debug_assertions) {
            "info"
        } else {
            "error"
        },
    ));

    iced::application("Marquee", App::update, App::view)
        .theme(|_| {
            iced::Theme::custom(
                "Marquee".into(),
                iced::theme::Palette {
                    background: color!(0x141414),
                    text: color!(0xffffff),
                    primary: color!(0xe50914),
                    success: color!(0x46d369),
                    danger: color!(0xe87c03),
                },
            )
        })
        .settings(iced::Settings {
            default_font: ui::SANS_FONT,
            default_text_size: 16.0.into(),
            antialiasing: true,
            ..Default::default()
        })
        .window(window::Settings {
            size: iced::Size::new(1280.0, 800.0),
            min_size: Some(iced::Size::new(800.0, 560.0)),
            exit_on_close_request: false,
            ..Default::default()
        })
        .subscription(App::subscription)
        .run_with(App::new)
}
