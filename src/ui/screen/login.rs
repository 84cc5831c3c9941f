use super::Screen;
use crate::ui::{
    greyscale, primary_button, themed_button, themed_checkbox, themed_text_input, AppState,
    BOLD_FONT, BRAND_RED,
};
use iced::widget::{button, center, checkbox, column, container, row, text, text_input};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    SignIn,
    SignUp,
}

/// Credentials are collected but never checked; submitting always succeeds.
pub struct Login {
    mode: FormMode,
    email: String,
    password: String,
    remember_me: bool,
}

impl Login {
    pub fn new(mode: FormMode) -> Self {
        Login {
            mode,
            email: String::new(),
            password: String::new(),
            remember_me: true,
        }
    }

    #[inline]
    pub fn mode(&self) -> FormMode {
        self.mode
    }
}

#[derive(Debug, Clone)]
pub enum LoginMessage {
    Email(String),
    Password(String),
    RememberMe(bool),
    Submit,
    SwitchMode,
}

impl Screen for Login {
    type Message = LoginMessage;

    fn update(
        &mut self,
        message: LoginMessage,
        _state: &mut AppState,
        _now: Instant,
    ) -> iced::Task<LoginMessage> {
        match message {
            LoginMessage::Email(email) => self.email = email,
            LoginMessage::Password(password) => self.password = password,
            LoginMessage::RememberMe(remember_me) => self.remember_me = remember_me,
            LoginMessage::Submit | LoginMessage::SwitchMode => {}
        }
        iced::Task::none()
    }

    fn view<'a, 'b>(&'a self, _state: &'a AppState) -> iced::Element<'b, LoginMessage>
    where
        'a: 'b,
    {
        let (heading, action, prompt, link) = match self.mode {
            FormMode::SignIn => ("Sign In", "Sign In", "New to Marquee?", "Sign up now."),
            FormMode::SignUp => (
                "Sign Up",
                "Sign Up",
                "Already have an account?",
                "Sign in now.",
            ),
        };

        let form = column![]
            .spacing(16.0)
            .width(iced::Length::Fill)
            .push(text(heading).font(BOLD_FONT).size(32.0))
            .push(
                text_input("Email or phone number", &self.email)
                    .on_input(LoginMessage::Email)
                    .on_submit(LoginMessage::Submit)
                    .padding(14.0)
                    .style(themed_text_input),
            )
            .push(
                text_input("Password", &self.password)
                    .secure(true)
                    .on_input(LoginMessage::Password)
                    .on_submit(LoginMessage::Submit)
                    .padding(14.0)
                    .style(themed_text_input),
            )
            .push(
                button(
                    text(action)
                        .font(BOLD_FONT)
                        .width(iced::Length::Fill)
                        .align_x(iced::Alignment::Center),
                )
                .on_press(LoginMessage::Submit)
                .padding(12.0)
                .width(iced::Length::Fill)
                .style(primary_button),
            )
            .push(
                row![]
                    .align_y(iced::Alignment::Center)
                    .push(
                        checkbox("Remember me", self.remember_me)
                            .on_toggle(LoginMessage::RememberMe)
                            .size(16.0)
                            .text_size(13.0)
                            .style(themed_checkbox),
                    )
                    .push(iced::widget::horizontal_space())
                    .push(text("Need help?").size(13.0).color(greyscale(170))),
            )
            .push(
                row![]
                    .spacing(4.0)
                    .align_y(iced::Alignment::Center)
                    .push(text(prompt).color(greyscale(115)))
                    .push(
                        button(text(link).font(BOLD_FONT))
                            .on_press(LoginMessage::SwitchMode)
                            .padding(2.0)
                            .style(themed_button),
                    ),
            );

        container(center(
            container(form)
                .padding(60.0)
                .max_width(450.0)
                .style(|_| container::Style {
                    background: Some(iced::Background::Color(iced::Color::BLACK.scale_alpha(0.8))),
                    border: iced::Border::default().rounded(4.0),
                    ..Default::default()
                }),
        ))
        .style(|_| container::Style {
            background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                iced::gradient::Linear::new(0.0)
                    .add_stop(0.0, iced::Color::BLACK)
                    .add_stop(1.0, BRAND_RED.scale_alpha(0.25)),
            ))),
            ..Default::default()
        })
        .width(iced::Length::Fill)
        .height(iced::Length::Fill)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::screen::testing::app_state;

    #[test]
    fn fields_track_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = app_state(dir.path());
        let mut login = Login::new(FormMode::SignIn);
        let now = Instant::now();

        let _ = login.update(LoginMessage::Email("a@b.c".into()), &mut state, now);
        let _ = login.update(LoginMessage::Password("hunter2".into()), &mut state, now);
        let _ = login.update(LoginMessage::RememberMe(false), &mut state, now);

        assert_eq!(login.email, "a@b.c");
        assert_eq!(login.password, "hunter2");
        assert!(!login.remember_me);
        assert_eq!(login.mode(), FormMode::SignIn);
    }
}
