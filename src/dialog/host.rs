//! Overlay host: presents the mounted dialog and keeps keyboard focus inside it.
//!
//! The host covers the whole screen but paints only the dialog; the backdrop
//! is transparent. Two sentinel focus positions bracket the content: when
//! tab navigation lands on one of them, focus is sent back around to the
//! other end of the content, which is what keeps focus trapped.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tracing::debug;

use super::element::{Element, ElementId, ElementKind};
use super::focus::{FocusTarget, FocusableSet, Sentinel};
use super::mount::{DialogContent, MountNode};
use super::service::DialogPresenter;
use crate::Theme;
use crate::config::{DialogAction, KeyResolver};
use crate::ui::{Component, EventResult, Result};

/// Dialogs never grow taller than this share of the screen.
pub const CONTENT_MAX_HEIGHT_PERCENT: u16 = 80;

/// Output of the host for its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// An enabled button was activated.
    Activated(ElementId),
    /// The value of an input changed.
    Changed(ElementId),
    /// The dismiss key was pressed.
    Dismissed,
}

/// The single overlay host of the application.
pub struct DialogHost<P: DialogPresenter> {
    presenter: P,
    resolver: Arc<KeyResolver>,
    showing: bool,
    /// Established on mount or first render, dropped on unmount.
    mount: Option<MountNode>,
    focused: Option<FocusTarget>,
    content_area: Option<Rect>,
    hit_areas: Vec<(ElementId, Rect)>,
    scroll: usize,
}

impl<P: DialogPresenter> DialogHost<P> {
    pub const fn new(presenter: P, resolver: Arc<KeyResolver>) -> Self {
        Self {
            presenter,
            resolver,
            showing: false,
            mount: None,
            focused: None,
            content_area: None,
            hit_areas: Vec::new(),
            scroll: 0,
        }
    }

    /// Establish the mount node and hand it to the presenter.
    pub fn on_mount(&mut self) {
        let node = self.mount.get_or_insert_with(MountNode::new).clone();
        self.presenter.set_host(&node);
    }

    pub fn on_unmount(&mut self) {
        self.mount = None;
        self.clear_interaction();
    }

    /// Apply the externally owned visibility flag.
    pub fn set_showing(&mut self, showing: bool) {
        if self.showing && !showing {
            self.clear_interaction();
        }
        self.showing = showing;
    }

    pub const fn is_showing(&self) -> bool {
        self.showing
    }

    /// Whether the overlay intercepts mouse input.
    pub const fn accepts_pointer_events(&self) -> bool {
        self.showing
    }

    /// Tab index of both sentinels; `-1` keeps them out of the tab order.
    pub const fn sentinel_tab_index(&self) -> i32 {
        if self.showing { 0 } else { -1 }
    }

    pub const fn focused(&self) -> Option<&FocusTarget> {
        self.focused.as_ref()
    }

    pub const fn mount_node(&self) -> Option<&MountNode> {
        self.mount.as_ref()
    }

    /// Area of the dialog as of the last render.
    pub const fn content_area(&self) -> Option<Rect> {
        self.content_area
    }

    /// Area of a focusable element as of the last render.
    pub fn element_area(&self, id: &ElementId) -> Option<Rect> {
        self.hit_areas
            .iter()
            .find(|(hit, _)| hit == id)
            .map(|(_, area)| *area)
    }

    /// Notification that new content has finished mounting.
    pub fn content_rendered(&mut self) {
        self.scroll = 0;
        let focusables = self.focusables();
        debug!(count = focusables.len(), "Dialog content rendered");
        if let Some(id) = focusables.initial() {
            debug!(%id, "Placing initial dialog focus");
            self.focused = Some(FocusTarget::Element(id.clone()));
        }
    }

    /// Focus arrives on a sentinel.
    ///
    /// Returns whether the host took over focus handling; sentinels cannot
    /// receive focus while the host is hidden.
    pub fn focus_sentinel(&mut self, sentinel: Sentinel) -> bool {
        if self.sentinel_tab_index() == -1 {
            return false;
        }

        self.focused = Some(FocusTarget::Sentinel(sentinel));
        let focusables = self.focusables();
        if let Some(id) = focusables.redirect(sentinel) {
            debug!(%id, ?sentinel, "Wrapping dialog focus");
            self.focused = Some(FocusTarget::Element(id.clone()));
        }
        true
    }

    fn focusables(&self) -> FocusableSet {
        self.mount
            .as_ref()
            .map_or_else(FocusableSet::empty, MountNode::focusables)
    }

    fn clear_interaction(&mut self) {
        self.focused = None;
        self.content_area = None;
        self.hit_areas.clear();
        self.scroll = 0;
    }

    fn move_focus(&mut self, backward: bool) {
        match self.focusables().step(self.focused.as_ref(), backward) {
            FocusTarget::Sentinel(sentinel) => {
                self.focus_sentinel(sentinel);
            }
            target => self.focused = Some(target),
        }
    }

    fn focused_element(&self) -> Option<&ElementId> {
        self.focused.as_ref().and_then(FocusTarget::element_id)
    }

    fn with_focused_mut<R>(&self, f: impl FnOnce(&mut Element) -> Option<R>) -> Option<R> {
        let id = self.focused_element()?;
        self.mount
            .as_ref()?
            .with_content_mut(|content| content.root.find_mut(id).and_then(f))
            .flatten()
    }

    fn edit_focused_input(&self, key: KeyEvent) -> Option<HostEvent> {
        self.with_focused_mut(|element| {
            if element.is_disabled() {
                return None;
            }
            let value = element.value_mut()?;
            match key.code {
                KeyCode::Char(c)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    value.push(c);
                }
                KeyCode::Backspace => {
                    value.pop();
                }
                _ => return None,
            }
            Some(HostEvent::Changed(element.id().clone()))
        })
    }

    /// Insert pasted text into the focused input.
    pub fn paste(&mut self, text: &str) -> EventResult<HostEvent> {
        if !self.showing {
            return EventResult::Ignored;
        }
        self.with_focused_mut(|element| {
            if element.is_disabled() {
                return None;
            }
            element
                .value_mut()?
                .extend(text.chars().filter(|c| !c.is_control()));
            Some(HostEvent::Changed(element.id().clone()))
        })
        .map_or(EventResult::Consumed, EventResult::Event)
    }

    /// Only enabled buttons activate; inputs and focusable text do not.
    fn activate_focused(&self) -> Option<HostEvent> {
        let id = self.focused_element()?;
        self.mount
            .as_ref()?
            .with_content(|content| {
                content
                    .root
                    .find(id)
                    .filter(|element| {
                        matches!(element.kind(), ElementKind::Button(_)) && !element.is_disabled()
                    })
                    .map(|element| HostEvent::Activated(element.id().clone()))
            })
            .flatten()
    }

    fn click_content(&mut self, position: Position) -> EventResult<HostEvent> {
        let Some(id) = self
            .hit_areas
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|(id, _)| id.clone())
        else {
            return EventResult::Consumed;
        };

        if !self.focusables().is_enabled(&id) {
            return EventResult::Consumed;
        }
        self.focused = Some(FocusTarget::Element(id));

        // Inputs take focus on click; only buttons activate.
        self.activate_focused()
            .map_or(EventResult::Consumed, EventResult::Event)
    }

    fn paint(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, content: &DialogContent) {
        let width = content.max_width.min(area.width);
        let inner_width = usize::from(width.saturating_sub(2));
        let rows = layout_rows(&content.root, inner_width);
        let total_rows: usize = rows.iter().map(|row| row.lines.len()).sum();

        let max_height = max_content_height(area.height);
        let wanted = u16::try_from(total_rows).unwrap_or(u16::MAX).saturating_add(2);
        let height = wanted.min(max_height);

        let popup = area.centered(Constraint::Length(width), Constraint::Length(height));
        frame.render_widget(Clear, popup);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border()))
            .style(Style::default().bg(theme.base));
        if let Some(title) = content.title.as_deref().filter(|title| !title.is_empty()) {
            block = block.title(format!(" {title} ")).title_style(
                Style::default()
                    .fg(theme.title())
                    .add_modifier(Modifier::BOLD),
            );
        }
        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        self.content_area = Some(popup);

        let visible = usize::from(inner.height);
        let focused_rows = self.focused_element().and_then(|id| {
            let mut start = 0;
            rows.iter().find_map(|row| {
                let range = (start, row.lines.len());
                start += row.lines.len();
                (row.element.id() == id).then_some(range)
            })
        });
        self.scroll = scroll_offset(self.scroll, focused_rows, visible, total_rows);

        let mut y = 0;
        for row in &rows {
            let focused = self.focused_element() == Some(row.element.id());
            for (offset, line) in row.lines.iter().enumerate() {
                let index = y + offset;
                if index < self.scroll || index >= self.scroll + visible {
                    continue;
                }
                let line_y = inner.y + u16::try_from(index - self.scroll).unwrap_or(u16::MAX);
                let line_area = Rect::new(inner.x, line_y, inner.width, 1);
                frame.render_widget(
                    Paragraph::new(styled_line(row.element, line, focused, theme)),
                    line_area,
                );
                if is_focusable(row.element) {
                    self.hit_areas.push((row.element.id().clone(), line_area));
                }
            }
            y += row.lines.len();
        }
    }
}

impl<P: DialogPresenter> Component for DialogHost<P> {
    type Output = HostEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if !self.showing {
            return Ok(EventResult::Ignored);
        }

        if self.resolver.matches_dialog(&key, DialogAction::FocusNext) {
            self.move_focus(false);
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_dialog(&key, DialogAction::FocusPrevious) {
            self.move_focus(true);
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_dialog(&key, DialogAction::Dismiss) {
            return Ok(HostEvent::Dismissed.into());
        }
        if let Some(event) = self.edit_focused_input(key) {
            return Ok(event.into());
        }
        if self.resolver.matches_dialog(&key, DialogAction::Activate)
            && let Some(event) = self.activate_focused()
        {
            return Ok(event.into());
        }

        // The dialog blocks everything below it.
        Ok(EventResult::Consumed)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<EventResult<Self::Output>> {
        if !self.accepts_pointer_events() {
            return Ok(EventResult::Ignored);
        }
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return Ok(EventResult::Consumed);
        };

        let position = Position::new(mouse.column, mouse.row);
        if self
            .content_area
            .is_some_and(|area| area.contains(position))
        {
            return Ok(self.click_content(position));
        }

        debug!(column = mouse.column, row = mouse.row, "Backdrop clicked");
        self.presenter.hide_dialog();
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let node = self.mount.get_or_insert_with(MountNode::new).clone();
        self.presenter.set_host(&node);

        self.content_area = None;
        self.hit_areas.clear();
        if !self.showing {
            return;
        }

        // Content may have been replaced or edited since focus was placed.
        if let Some(id) = self.focused_element()
            && !node.focusables().contains(id)
        {
            debug!(%id, "Focused element left the dialog");
            self.focused = None;
        }
        node.with_content(|content| self.paint(frame, area, theme, content));
    }
}

struct Row<'a> {
    element: &'a Element,
    lines: Vec<String>,
}

fn layout_rows(root: &Element, width: usize) -> Vec<Row<'_>> {
    root.lines()
        .into_iter()
        .map(|element| {
            let lines = match element.kind() {
                ElementKind::Text(text) => wrap_text(text, width),
                _ => vec![String::new()],
            };
            Row { element, lines }
        })
        .collect()
}

fn is_focusable(element: &Element) -> bool {
    element.tab_index().is_some_and(|index| index != -1)
}

fn max_content_height(screen_height: u16) -> u16 {
    let limit = u32::from(screen_height) * u32::from(CONTENT_MAX_HEIGHT_PERCENT) / 100;
    u16::try_from(limit).unwrap_or(u16::MAX).max(3).min(screen_height)
}

/// Scroll position that keeps the focused rows (`start`, `len`) in view.
fn scroll_offset(current: usize, focused: Option<(usize, usize)>, visible: usize, total: usize) -> usize {
    let max = total.saturating_sub(visible);
    let offset = match focused {
        Some((start, _)) if start < current => start,
        Some((start, len)) if visible > 0 && start + len > current + visible => {
            (start + len).saturating_sub(visible).min(start)
        }
        _ => current,
    };
    offset.min(max)
}

/// Greedy word wrap on character counts. Always yields at least one line.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let current_len = current.chars().count();
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    lines.push(current);
    lines
}

fn styled_line(element: &Element, text_line: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let base = if element.is_disabled() {
        Style::default().fg(theme.disabled())
    } else {
        Style::default().fg(theme.text)
    };
    let focus = Style::default()
        .fg(theme.focus_fg())
        .bg(theme.focus_bg())
        .add_modifier(Modifier::BOLD);
    let marker = if focused { "› " } else { "  " };

    match element.kind() {
        ElementKind::Group => Line::default(),
        ElementKind::Text(_) => {
            let style = if focused { focus } else { base.fg(theme.muted()) };
            Line::from(Span::styled(text_line.to_string(), style))
        }
        ElementKind::Button(label) => {
            let style = if focused { focus } else { base };
            Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("[ {label} ]"), style),
            ])
        }
        ElementKind::Input {
            label,
            value,
            masked,
        } => {
            let shown = if *masked {
                "•".repeat(value.chars().count())
            } else {
                value.clone()
            };
            let cursor = if focused { "▏" } else { "" };
            let value_style = if focused {
                focus
            } else {
                base.add_modifier(Modifier::UNDERLINED)
            };
            Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{label}: "), base),
                Span::styled(format!("{shown}{cursor}"), value_style),
            ])
        }
    }
}
