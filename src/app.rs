use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::Theme;
use crate::config::{DialogAction, GlobalAction, KeyResolver};
use crate::demo::DemoDialog;
use crate::dialog::{DialogHost, DialogPresenter, DialogService, HostEvent};
use crate::message::AppMessage;
use crate::store::DialogStore;
use crate::tui::{Event, Tui};
use crate::ui::{Component, EventResult};

pub struct App {
    theme: Theme,
    resolver: Arc<KeyResolver>,
    store: DialogStore,
    service: DialogService,
    host: DialogHost<DialogService>,
    /// Demo dialog currently mounted, if any.
    active: Option<DemoDialog>,
    status: String,
    should_quit: bool,
    should_suspend: bool,
    message_tx: UnboundedSender<AppMessage>,
    message_rx: UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(resolver: Arc<KeyResolver>, theme: Theme) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let store = DialogStore::new();
        let service = DialogService::new(store.clone(), message_tx.clone());
        let host = DialogHost::new(service.clone(), resolver.clone());

        Self {
            theme,
            resolver,
            store,
            service,
            host,
            active: None,
            status: String::new(),
            should_quit: false,
            should_suspend: false,
            message_tx,
            message_rx,
        }
    }

    /// Queue a demo dialog to be opened once the loop starts.
    pub fn open_on_start(&self, dialog: DemoDialog) -> Result<()> {
        self.message_tx.send(AppMessage::OpenDialog(dialog))?;
        Ok(())
    }

    pub async fn run(&mut self, frame_rate: f64, tick_rate: f64) -> Result<()> {
        let mut tui = Tui::new(frame_rate, tick_rate)?;
        tui.enter()?;
        self.host.on_mount();

        loop {
            self.handle_events(&mut tui).await?;
            self.handle_messages(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                self.should_suspend = false;
                self.message_tx.send(AppMessage::Resume)?;
                self.message_tx.send(AppMessage::ClearScreen)?;
                tui.enter()?;
            } else if self.should_quit {
                break;
            }
        }

        self.host.on_unmount();
        tui.exit()?;
        info!("Exiting");
        Ok(())
    }

    /// Pass the store's visibility flag down to the host.
    fn sync_host(&mut self) {
        let showing = self.store.showing();
        if !showing && self.active.take().is_some() {
            debug!("Active dialog closed");
        }
        self.host.set_showing(showing);
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };

        self.sync_host();
        match event {
            Event::Quit => self.message_tx.send(AppMessage::Quit)?,
            Event::Tick => self.message_tx.send(AppMessage::Tick)?,
            Event::Render => self.message_tx.send(AppMessage::Render)?,
            Event::Resize(width, height) => {
                self.message_tx.send(AppMessage::Resize(width, height))?;
            }
            Event::Error(error) => warn!(%error, "Terminal event error"),
            Event::Paste(text) => {
                let result = self.host.paste(&text);
                self.handle_host_result(result)?;
            }
            Event::Key(key) => self.handle_key(key)?,
            Event::Mouse(mouse) => self.handle_mouse(mouse)?,
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let result = self.host.handle_key(key)?;
        if result.is_consumed() {
            return self.handle_host_result(result);
        }

        let message = [
            (GlobalAction::Quit, AppMessage::Quit),
            (GlobalAction::Suspend, AppMessage::Suspend),
            (GlobalAction::OpenConfirm, AppMessage::OpenDialog(DemoDialog::Confirm)),
            (GlobalAction::OpenBot, AppMessage::OpenDialog(DemoDialog::OpenBot)),
            (GlobalAction::OpenUpdate, AppMessage::OpenDialog(DemoDialog::Update)),
        ]
        .into_iter()
        .find(|(action, _)| self.resolver.matches_global(&key, *action))
        .map(|(_, message)| message);

        if let Some(message) = message {
            self.message_tx.send(message)?;
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        let result = self.host.handle_mouse(mouse)?;
        self.handle_host_result(result)?;
        // A backdrop click hides through the service directly.
        self.sync_host();
        Ok(())
    }

    fn handle_host_result(&mut self, result: EventResult<HostEvent>) -> Result<()> {
        let Some(event) = result.event() else {
            return Ok(());
        };
        let Some(dialog) = self.active else {
            return Ok(());
        };

        match event {
            HostEvent::Activated(id) => {
                let summary = self
                    .service
                    .update_content(|content| dialog.summary(&id, content))
                    .unwrap_or_default();
                debug!(%id, "Dialog action activated");
                self.message_tx.send(AppMessage::Status(summary))?;
                self.message_tx.send(AppMessage::CloseDialog)?;
            }
            HostEvent::Changed(_) => {
                self.service
                    .update_content(|content| dialog.on_change(content));
            }
            HostEvent::Dismissed => {
                self.message_tx
                    .send(AppMessage::Status(format!("{} dismissed", dialog.name())))?;
                self.message_tx.send(AppMessage::CloseDialog)?;
            }
        }
        Ok(())
    }

    fn handle_messages(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(message) = self.message_rx.try_recv() {
            match message {
                AppMessage::Render => {
                    tui.draw(|frame| self.render(frame))?;
                }
                AppMessage::Resize(width, height) => {
                    tui.resize(Rect::new(0, 0, width, height))?;
                    tui.draw(|frame| self.render(frame))?;
                }
                AppMessage::ClearScreen => tui.clear()?,
                message => self.apply(message),
            }
        }
        Ok(())
    }

    /// Handle a message that does not need the terminal.
    fn apply(&mut self, message: AppMessage) {
        if !matches!(message, AppMessage::Tick | AppMessage::Render) {
            debug!(?message, "Handling message");
        }

        match message {
            AppMessage::Tick | AppMessage::Render | AppMessage::Resize(..) | AppMessage::ClearScreen => {}
            AppMessage::Suspend => self.should_suspend = true,
            AppMessage::Resume => self.should_suspend = false,
            AppMessage::Quit => self.should_quit = true,
            AppMessage::OpenDialog(dialog) => match self.service.show_dialog(dialog.content()) {
                Ok(()) => {
                    self.active = Some(dialog);
                    self.status = format!("{} opened", dialog.name());
                }
                Err(error) => {
                    warn!(%error, "Could not open dialog");
                    self.status = format!("Error: {error}");
                }
            },
            AppMessage::DialogRendered => {
                self.sync_host();
                self.host.content_rendered();
            }
            AppMessage::CloseDialog => {
                self.service.hide_dialog();
                self.sync_host();
            }
            AppMessage::Status(status) => self.status = status,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [main, status] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        self.render_background(frame, main);
        let status_color = if self.status.starts_with("Error") {
            self.theme.error()
        } else {
            self.theme.muted()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                self.status.as_str(),
                Style::default().fg(status_color),
            ))
            .style(Style::default().bg(self.theme.mantle)),
            status,
        );

        self.sync_host();
        self.host.render(frame, area, &self.theme);
    }

    fn render_background(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let key_style = Style::default()
            .fg(theme.focus_fg())
            .add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(theme.text);

        let hint = |action: GlobalAction, text: &'static str| {
            Line::from(vec![
                Span::styled(format!("{:>8}", self.resolver.display_global(action)), key_style),
                Span::styled(format!("  {text}"), text_style),
            ])
        };

        let dialog_keys = [
            DialogAction::FocusNext,
            DialogAction::FocusPrevious,
            DialogAction::Activate,
            DialogAction::Dismiss,
        ]
        .map(|action| self.resolver.display_dialog(action));

        let lines = vec![
            hint(GlobalAction::OpenConfirm, "open a confirmation"),
            hint(GlobalAction::OpenBot, "open a form"),
            hint(GlobalAction::OpenUpdate, "open a notice"),
            hint(GlobalAction::Suspend, "suspend"),
            hint(GlobalAction::Quit, "quit"),
            Line::default(),
            Line::from(Span::styled(
                format!(
                    "In a dialog: {} / {} move focus, {} activates, {} dismisses",
                    dialog_keys[0], dialog_keys[1], dialog_keys[2], dialog_keys[3]
                ),
                Style::default().fg(theme.muted()),
            )),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.surface1))
            .title(Span::styled(
                " dialoghost ",
                Style::default().fg(theme.title()).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme.base));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::dialog::ElementId;
    use crate::dialog::focus::{FocusTarget, Sentinel};
    use crate::dialog::modal::CLOSE_BUTTON_ID;

    fn app() -> App {
        let mut app = App::new(Arc::new(KeyResolver::default()), Theme::default());
        app.host.on_mount();
        app
    }

    /// Apply queued messages until the queue is empty.
    fn drain(app: &mut App) {
        while let Ok(message) = app.message_rx.try_recv() {
            app.apply(message);
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
        drain(app);
    }

    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    #[test]
    fn test_open_places_initial_focus() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));

        assert!(app.store.showing());
        assert_eq!(app.active, Some(DemoDialog::Confirm));
        assert_eq!(
            app.host.focused(),
            Some(&FocusTarget::Element(ElementId::new(CLOSE_BUTTON_ID)))
        );
    }

    #[test]
    fn test_global_keys_are_blocked_while_showing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_dismiss_closes_the_dialog() {
        let mut app = app();
        press(&mut app, KeyCode::Char('u'));
        press(&mut app, KeyCode::Esc);

        assert!(!app.store.showing());
        assert_eq!(app.active, None);
        assert_eq!(app.status, "Update dismissed");
        assert_eq!(app.host.focused(), None);
    }

    #[test]
    fn test_activating_an_action_reports_and_closes() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        // close button, cancel, delete
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);

        assert!(!app.store.showing());
        assert_eq!(app.status, "Confirm: delete");
    }

    #[test]
    fn test_clearing_the_endpoint_disables_connect() {
        let mut app = app();
        press(&mut app, KeyCode::Char('o'));
        // close button, then the endpoint input
        press(&mut app, KeyCode::Tab);
        for _ in 0..64 {
            press(&mut app, KeyCode::Backspace);
        }

        app.host.focus_sentinel(Sentinel::Start);
        assert_eq!(
            app.host.focused(),
            Some(&FocusTarget::Element(ElementId::new("cancel")))
        );

        // wrap around to the endpoint again and fill it in
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        for c in "localhost".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        app.host.focus_sentinel(Sentinel::Start);
        assert_eq!(
            app.host.focused(),
            Some(&FocusTarget::Element(ElementId::new("connect")))
        );
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status, "Connecting to localhost");
    }

    #[test]
    fn test_enter_in_a_form_field_keeps_the_dialog_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Tab);
        for _ in 0..64 {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Enter);

        assert!(app.store.showing());
        assert_eq!(app.active, Some(DemoDialog::OpenBot));
        assert_eq!(app.status, "Open bot opened");
    }

    #[test]
    fn test_backdrop_click_closes() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        draw(&mut app);

        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
        .unwrap();

        assert!(!app.store.showing());
        assert!(!app.host.is_showing());
        assert_eq!(app.active, None);
    }

    #[test]
    fn test_quit_without_dialog() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_open_before_host_mounted_reports_error() {
        let mut app = App::new(Arc::new(KeyResolver::default()), Theme::default());
        app.apply(AppMessage::OpenDialog(DemoDialog::Confirm));
        assert!(app.status.starts_with("Error:"));
        assert!(!app.store.showing());
    }
}
