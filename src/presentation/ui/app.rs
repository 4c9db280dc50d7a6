//! Navigation shell and event loop.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures_util::StreamExt;
use futures_util::future::BoxFuture;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::entity_view::{EntityPage, EntityView};
use super::home_screen::{HomePage, HomeScreen};
use super::order_view::{OrderPage, OrderView};
use crate::application::use_cases::{CustomerResource, GoodsResource};
use crate::domain::Route;
use crate::domain::keybinding::Keybind;
use crate::domain::ports::ApiPort;
use crate::presentation::events::{EventResult, ScreenRequest, key_press};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    FocusArea, FooterBar, FooterBarStyle, HeaderBar, HeaderBarStyle,
};

/// Signal sent when a spawned screen request has finished.
#[derive(Debug)]
struct RequestDone;

enum CurrentScreen {
    Home(HomeScreen),
    Customers(EntityView<CustomerResource>),
    Goods(EntityView<GoodsResource>),
    Orders(OrderView),
}

impl CurrentScreen {
    fn mount(route: Route, api: &Arc<dyn ApiPort>) -> Self {
        match route {
            Route::Home => Self::Home(HomeScreen::new()),
            Route::Pelanggan => Self::Customers(EntityView::new(Arc::clone(api))),
            Route::Barang => Self::Goods(EntityView::new(Arc::clone(api))),
            Route::Penjualan => Self::Orders(OrderView::new(Arc::clone(api))),
        }
    }

    const fn route(&self) -> Route {
        match self {
            Self::Home(_) => Route::Home,
            Self::Customers(_) => Route::Pelanggan,
            Self::Goods(_) => Route::Barang,
            Self::Orders(_) => Route::Penjualan,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> EventResult {
        match self {
            Self::Home(screen) => screen.handle_key(key),
            Self::Customers(view) => view.handle_key(key),
            Self::Goods(view) => view.handle_key(key),
            Self::Orders(view) => view.handle_key(key),
        }
    }

    fn task(&self, request: ScreenRequest) -> Option<BoxFuture<'static, ()>> {
        match self {
            Self::Home(_) => None,
            Self::Customers(view) => Some(view.task(request)),
            Self::Goods(view) => Some(view.task(request)),
            Self::Orders(view) => Some(view.task(request)),
        }
    }

    fn bindings(&self) -> &[Keybind] {
        match self {
            Self::Home(screen) => screen.bindings(),
            Self::Customers(view) => view.bindings(),
            Self::Goods(view) => view.bindings(),
            Self::Orders(view) => view.bindings(),
        }
    }

    fn focus_area(&self) -> FocusArea {
        match self {
            Self::Home(_) => FocusArea::Menu,
            Self::Customers(view) => view.focus_area(),
            Self::Goods(view) => view.focus_area(),
            Self::Orders(view) => view.focus_area(),
        }
    }

    fn editing(&self) -> Option<bool> {
        match self {
            Self::Home(_) => None,
            Self::Customers(view) => Some(view.screen().editing_id().is_some()),
            Self::Goods(view) => Some(view.screen().editing_id().is_some()),
            Self::Orders(view) => Some(view.screen().editing_id().is_some()),
        }
    }
}

/// Terminal application: one mounted screen at a time.
pub struct App {
    api: Arc<dyn ApiPort>,
    theme: Theme,
    backend: String,
    screen: CurrentScreen,
    running: bool,
    pending_requests: usize,
    done_tx: mpsc::UnboundedSender<RequestDone>,
    done_rx: mpsc::UnboundedReceiver<RequestDone>,
}

impl App {
    #[must_use]
    pub fn new(api: Arc<dyn ApiPort>, theme: Theme, backend: impl Into<String>) -> Self {
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        Self {
            api,
            theme,
            backend: backend.into(),
            screen: CurrentScreen::Home(HomeScreen::new()),
            running: true,
            pending_requests: 0,
            done_tx,
            done_rx,
        }
    }

    /// Returns the mounted screen's route.
    #[must_use]
    pub const fn route(&self) -> Route {
        self.screen.route()
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                Some(RequestDone) = self.done_rx.recv() => {
                    self.pending_requests = self.pending_requests.saturating_sub(1);
                }

                event = terminal_events.next() => match event {
                    Some(Ok(event)) => self.handle_terminal_event(&event),
                    Some(Err(e)) => return Err(e.into()),
                    None => self.running = false,
                },
            }
            terminal.draw(|frame| self.render(frame))?;
        }

        info!("Application exiting normally");
        Ok(())
    }

    fn handle_terminal_event(&mut self, event: &Event) {
        let Some(key) = key_press(event) else {
            return;
        };

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        match self.screen.handle_key(&key) {
            EventResult::Continue => {}
            EventResult::Exit => self.running = false,
            EventResult::Navigate(route) => self.navigate(route),
            EventResult::Request(request) => self.spawn_request(request),
        }
    }

    /// Mounts a fresh screen; the previous screen's state is dropped.
    pub fn navigate(&mut self, route: Route) {
        debug!(from = %self.screen.route(), to = %route, "Navigating");
        self.screen = CurrentScreen::mount(route, &self.api);
        if route != Route::Home {
            self.spawn_request(ScreenRequest::Fetch);
        }
    }

    /// Runs a request of the mounted screen in the background.
    ///
    /// Requests are never awaited by the event loop, so the screen stays
    /// usable and may start overlapping requests.
    fn spawn_request(&mut self, request: ScreenRequest) {
        let Some(task) = self.screen.task(request) else {
            return;
        };
        debug!(route = %self.screen.route(), ?request, "Spawning request");
        self.pending_requests += 1;
        let done_tx = self.done_tx.clone();
        tokio::spawn(async move {
            task.await;
            let _ = done_tx.send(RequestDone);
        });
    }

    fn render(&mut self, frame: &mut Frame) {
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let route = self.screen.route();
        frame.render_widget(
            HeaderBar::new(crate::NAME, crate::VERSION)
                .title(route.title())
                .backend(&self.backend)
                .pending_requests(self.pending_requests)
                .style(HeaderBarStyle::from_theme(&self.theme)),
            header_area,
        );

        match &mut self.screen {
            CurrentScreen::Home(screen) => {
                frame.render_widget(HomePage::new(screen, &self.theme), body_area);
            }
            CurrentScreen::Customers(view) => {
                frame.render_stateful_widget(EntityPage::new(&self.theme), body_area, view);
            }
            CurrentScreen::Goods(view) => {
                frame.render_stateful_widget(EntityPage::new(&self.theme), body_area, view);
            }
            CurrentScreen::Orders(view) => {
                frame.render_stateful_widget(OrderPage::new(&self.theme), body_area, view);
            }
        }

        let mode = self
            .screen
            .editing()
            .map(|editing| if editing { "Update " } else { "Simpan " });
        frame.render_widget(
            FooterBar::new(self.screen.bindings())
                .focus(self.screen.focus_area())
                .right_info(mode)
                .style(FooterBarStyle::from_theme(&self.theme)),
            footer_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::InMemoryBackend;
    use crossterm::event::KeyEventKind;
    use std::time::Duration;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Press,
        ))
    }

    fn app(backend: &Arc<InMemoryBackend>) -> App {
        let api: Arc<dyn ApiPort> = backend.clone();
        App::new(api, Theme::default(), "http://localhost/api")
    }

    async fn settle(app: &mut App) {
        while app.pending_requests > 0 {
            if tokio::time::timeout(Duration::from_secs(1), app.done_rx.recv())
                .await
                .ok()
                .flatten()
                .is_none()
            {
                break;
            }
            app.pending_requests -= 1;
        }
    }

    #[tokio::test]
    async fn test_opening_a_screen_fetches_it() {
        let backend = Arc::new(InMemoryBackend::new());
        let mut app = app(&backend);

        app.handle_terminal_event(&press(KeyCode::Down));
        app.handle_terminal_event(&press(KeyCode::Enter));
        assert_eq!(app.route(), Route::Barang);
        settle(&mut app).await;

        assert_eq!(backend.count("GET", "/barangs"), 1);
    }

    #[tokio::test]
    async fn test_navigation_discards_screen_state() {
        let backend = Arc::new(InMemoryBackend::new());
        let mut app = app(&backend);

        app.navigate(Route::Pelanggan);
        app.handle_terminal_event(&press(KeyCode::Char('x')));
        app.handle_terminal_event(&press(KeyCode::Esc));
        assert_eq!(app.route(), Route::Home);

        app.navigate(Route::Pelanggan);
        settle(&mut app).await;
        let CurrentScreen::Customers(view) = &app.screen else {
            panic!("customer screen not mounted");
        };
        assert!(view.screen().form().code.is_empty());
        assert_eq!(backend.count("GET", "/pelanggans"), 2);
    }

    #[tokio::test]
    async fn test_quit_from_home() {
        let backend = Arc::new(InMemoryBackend::new());
        let mut app = app(&backend);
        app.handle_terminal_event(&press(KeyCode::Char('q')));
        assert!(!app.running);
    }
}
