use super::{
    screen::{self, Screen, Shortcut},
    AppState, Route, Router,
};
use crate::{catalog, session::MemorySession, settings::UserSettings};
use std::time::Instant;

pub struct App {
    now: Instant,
    screen: AppScreen,
    state: AppState,
    router: Router,
}

impl App {
    pub fn new() -> (Self, iced::Task<Message>) {
        let storage_path = directories::ProjectDirs::from("com", "Marquee", "Marquee")
            .map(|dirs| dirs.data_local_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("marquee"));
        if let Err(err) = std::fs::create_dir_all(&storage_path) {
            log::error!("cannot create {}: {}", storage_path.display(), err);
        }

        let settings = UserSettings::load(&storage_path);
        let catalog = catalog::Catalog::load_or_builtin(settings.catalog_path.as_deref());
        log::info!(
            "loaded {} titles in {} rows",
            catalog.iter().count(),
            catalog.rows.len()
        );

        let state = AppState {
            storage_path,
            catalog,
            settings,
            session: Box::new(MemorySession::default()),
        };

        (App::with_state(state, Instant::now()), iced::Task::none())
    }

    fn with_state(state: AppState, now: Instant) -> Self {
        App {
            now,
            screen: AppScreen::Login(screen::Login::new(screen::FormMode::SignIn)),
            state,
            router: Router::new(Route::Login),
        }
    }

    pub fn subscription(&self) -> iced::Subscription<Message> {
        iced::Subscription::batch([
            match &self.screen {
                AppScreen::Intro(screen) => screen.subscription().map(Message::Intro),
                AppScreen::Home(screen) => screen.subscription().map(Message::Home),
                AppScreen::Player(screen) => screen.subscription().map(Message::Player),
                AppScreen::Login(_) | AppScreen::NotFound(_) => iced::Subscription::none(),
            },
            iced::keyboard::on_key_press(|key, modifiers| {
                Shortcut::from_key(key, modifiers).map(Message::Shortcut)
            }),
            iced::event::listen_with(|event, _, _| match event {
                iced::Event::Window(iced::window::Event::CloseRequested) => Some(Message::Exit),
                iced::Event::Window(iced::window::Event::Resized(_)) => {
                    Some(Message::WindowResized)
                }
                _ => None,
            }),
        ])
    }

    /// Builds the screen for `route`. Home detours through the intro once per session.
    fn show(&mut self, route: Route) -> iced::Task<Message> {
        log::debug!("showing {:?}", route);

        let leaving_player = matches!(self.screen, AppScreen::Player(_));
        let (screen, task) = match route {
            Route::Login | Route::Signup => {
                let mode = if route == Route::Login {
                    screen::FormMode::SignIn
                } else {
                    screen::FormMode::SignUp
                };
                (
                    AppScreen::Login(screen::Login::new(mode)),
                    iced::Task::none(),
                )
            }
            Route::Home
                if self.state.settings.show_intro && !self.state.session.intro_seen() =>
            {
                let (screen, task) = screen::Intro::new(&self.state.settings, self.now);
                (AppScreen::Intro(screen), task.map(Message::Intro))
            }
            Route::Home => {
                let (screen, task) = screen::Home::new(&self.state, self.now);
                (AppScreen::Home(screen), task.map(Message::Home))
            }
            Route::Watch(id) => match screen::Watch::resolve(id, &self.state, self.now) {
                screen::Watch::Player(player) => (AppScreen::Player(player), iced::Task::none()),
                screen::Watch::NotFound(id) => (
                    AppScreen::NotFound(screen::NotFound::new(id)),
                    iced::Task::none(),
                ),
            },
        };
        self.screen = screen;

        if leaving_player {
            iced::Task::batch([
                iced::window::get_latest()
                    .and_then(|id| iced::window::change_mode(id, iced::window::Mode::Windowed)),
                task,
            ])
        } else {
            task
        }
    }

    fn navigate(&mut self, route: Route) -> iced::Task<Message> {
        self.router.push(route);
        self.show(route)
    }

    fn back(&mut self) -> iced::Task<Message> {
        match self.router.back() {
            Some(route) => self.show(route),
            None => iced::Task::none(),
        }
    }

    pub fn update(&mut self, message: Message) -> iced::Task<Message> {
        self.now = Instant::now();

        match message {
            Message::Login(screen::LoginMessage::Submit) => {
                self.state.session.clear_intro();
                self.navigate(Route::Home)
            }
            Message::Login(screen::LoginMessage::SwitchMode) => {
                let AppScreen::Login(screen) = &self.screen else {
                    return iced::Task::none();
                };
                let route = match screen.mode() {
                    screen::FormMode::SignIn => Route::Signup,
                    screen::FormMode::SignUp => Route::Login,
                };
                self.navigate(route)
            }
            Message::Intro(screen::IntroMessage::Finished) => {
                self.state.session.mark_intro_seen();
                self.show(Route::Home)
            }
            Message::Home(screen::HomeMessage::Play(id)) => self.navigate(Route::Watch(id)),
            Message::Home(screen::HomeMessage::SignOut) => {
                self.router.reset(Route::Login);
                self.show(Route::Login)
            }
            Message::Player(screen::PlayerMessage::Back) => self.back(),
            Message::Login(message) => {
                let AppScreen::Login(screen) = &mut self.screen else {
                    return iced::Task::none();
                };
                screen
                    .update(message, &mut self.state, self.now)
                    .map(Message::Login)
            }
            Message::Intro(message) => {
                let AppScreen::Intro(screen) = &mut self.screen else {
                    return iced::Task::none();
                };
                screen
                    .update(message, &mut self.state, self.now)
                    .map(Message::Intro)
            }
            Message::Home(message) => {
                let AppScreen::Home(screen) = &mut self.screen else {
                    return iced::Task::none();
                };
                screen
                    .update(message, &mut self.state, self.now)
                    .map(Message::Home)
            }
            Message::Player(message) => {
                let AppScreen::Player(screen) = &mut self.screen else {
                    return iced::Task::none();
                };
                screen
                    .update(message, &mut self.state, self.now)
                    .map(Message::Player)
            }
            Message::Shortcut(shortcut) => match &self.screen {
                AppScreen::Player(screen) => match screen.shortcut(shortcut) {
                    Some(message) => iced::Task::done(Message::Player(message)),
                    None => iced::Task::none(),
                },
                AppScreen::Home(screen) if shortcut == Shortcut::Escape => {
                    if screen.details().is_some() {
                        iced::Task::done(Message::Home(screen::HomeMessage::CloseDetails))
                    } else {
                        iced::Task::none()
                    }
                }
                AppScreen::Intro(_) if shortcut == Shortcut::Escape => {
                    iced::Task::done(Message::Intro(screen::IntroMessage::Skip))
                }
                _ => iced::Task::none(),
            },
            Message::WindowResized => {
                if !matches!(self.screen, AppScreen::Player(_)) {
                    return iced::Task::none();
                }
                iced::window::get_latest()
                    .and_then(iced::window::get_mode)
                    .map(|mode| {
                        Message::Player(screen::PlayerMessage::PresentationObserved(mode.into()))
                    })
            }
            Message::Exit => {
                if let Err(err) = self.state.save_settings() {
                    log::error!("failed to save settings: {:#}", err);
                }
                iced::exit()
            }
        }
    }

    pub fn view(&self) -> iced::Element<Message> {
        match &self.screen {
            AppScreen::Login(screen) => screen.view(&self.state).map(Message::Login),
            AppScreen::Intro(screen) => screen.view(&self.state).map(Message::Intro),
            AppScreen::Home(screen) => screen.view(&self.state).map(Message::Home),
            AppScreen::Player(screen) => screen.view(&self.state).map(Message::Player),
            AppScreen::NotFound(screen) => screen.view(&self.state).map(unreachable_message),
        }
    }
}

fn unreachable_message(message: screen::NotFoundMessage) -> Message {
    match message {}
}

#[derive(Debug, Clone)]
pub enum Message {
    Login(screen::LoginMessage),
    Intro(screen::IntroMessage),
    Home(screen::HomeMessage),
    Player(screen::PlayerMessage),

    Shortcut(Shortcut),
    WindowResized,
    Exit,
}

pub enum AppScreen {
    Login(screen::Login),
    Intro(screen::Intro),
    Home(screen::Home),
    Player(screen::Player),
    NotFound(screen::NotFound),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::screen::testing::app_state;

    fn signed_out_app(dir: &std::path::Path) -> App {
        let mut state = app_state(dir);
        state.settings.show_intro = true;
        App::with_state(state, Instant::now())
    }

    #[test]
    fn first_home_visit_plays_intro_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = signed_out_app(dir.path());
        assert!(matches!(app.screen, AppScreen::Login(_)));

        let _ = app.update(Message::Login(screen::LoginMessage::Submit));
        assert!(matches!(app.screen, AppScreen::Intro(_)));
        assert!(!app.state.session.intro_seen());

        let _ = app.update(Message::Intro(screen::IntroMessage::Finished));
        assert!(matches!(app.screen, AppScreen::Home(_)));
        assert!(app.state.session.intro_seen());

        let id = app.state.catalog.iter().next().unwrap().id;
        let _ = app.update(Message::Home(screen::HomeMessage::Play(id)));
        assert!(matches!(app.screen, AppScreen::Player(_)));

        let _ = app.update(Message::Player(screen::PlayerMessage::Back));
        assert!(matches!(app.screen, AppScreen::Home(_)));
    }

    #[test]
    fn signing_in_again_replays_intro() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = signed_out_app(dir.path());

        let _ = app.update(Message::Login(screen::LoginMessage::Submit));
        let _ = app.update(Message::Intro(screen::IntroMessage::Finished));
        let _ = app.update(Message::Home(screen::HomeMessage::SignOut));
        assert!(matches!(app.screen, AppScreen::Login(_)));
        assert!(app.state.session.intro_seen());

        let _ = app.update(Message::Login(screen::LoginMessage::Submit));
        assert!(!app.state.session.intro_seen());
        assert!(matches!(app.screen, AppScreen::Intro(_)));
    }

    #[test]
    fn intro_is_skipped_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = signed_out_app(dir.path());
        app.state.settings.show_intro = false;

        let _ = app.update(Message::Login(screen::LoginMessage::Submit));
        assert!(matches!(app.screen, AppScreen::Home(_)));
    }

    #[test]
    fn unknown_title_shows_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = signed_out_app(dir.path());
        app.state.settings.show_intro = false;
        let _ = app.update(Message::Login(screen::LoginMessage::Submit));

        let _ = app.update(Message::Home(screen::HomeMessage::Play(
            crate::catalog::ContentId(u32::MAX),
        )));
        assert!(matches!(app.screen, AppScreen::NotFound(_)));
    }
}
