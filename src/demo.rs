//! Demo dialogs the application can open.

use clap::ValueEnum;

use crate::dialog::{DialogContent, Element, ElementId, Modal};

const BOT_URL_ID: &str = "bot-url";
const CONNECT_ID: &str = "connect";
const DEFAULT_ENDPOINT: &str = "http://localhost:3978/api/messages";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoDialog {
    /// Yes/no confirmation
    Confirm,
    /// Form whose connect button is disabled while the endpoint is empty
    OpenBot,
    /// Notice whose last action is disabled
    Update,
}

impl DemoDialog {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Confirm => "Confirm",
            Self::OpenBot => "Open bot",
            Self::Update => "Update",
        }
    }

    pub fn content(self) -> DialogContent {
        match self {
            Self::Confirm => Modal::new()
                .with_title("Delete bot?")
                .with_description(
                    "The bot configuration will be removed from this workspace. \
                     Transcripts on disk are kept.",
                )
                .actions([
                    Element::button("cancel", "Cancel"),
                    Element::button("delete", "Delete"),
                ])
                .build(),
            Self::OpenBot => Modal::new()
                .with_title("Open a bot")
                .with_description("Connect to a running bot by its endpoint.")
                .content([
                    Element::input(BOT_URL_ID, "Endpoint URL").with_value(DEFAULT_ENDPOINT),
                    Element::input("app-id", "App ID"),
                    Element::input("app-password", "App password").masked(),
                ])
                .actions([
                    Element::button("cancel", "Cancel"),
                    Element::button(CONNECT_ID, "Connect"),
                ])
                .build(),
            Self::Update => Modal::new()
                .with_title("Update available")
                .with_description("Version 4.15.1 has been downloaded and is ready to install.")
                .with_max_width(50)
                .content([Element::text(
                    "changes",
                    "Adds transcript search, fixes reconnecting to bots behind a proxy \
                     and speeds up loading large chat logs.",
                )
                .with_tab_index(0)])
                .actions([
                    Element::button("later", "Later"),
                    Element::button("install", "Install and restart"),
                    Element::button("notes", "Release notes").disabled(),
                ])
                .build(),
        }
    }

    /// Keep dependent state of the form in sync after an input changed.
    pub fn on_change(self, content: &mut DialogContent) {
        if self != Self::OpenBot {
            return;
        }
        let url_empty = content
            .root
            .find(&BOT_URL_ID.into())
            .and_then(Element::value)
            .is_none_or(|url| url.trim().is_empty());
        if let Some(connect) = content.root.find_mut(&CONNECT_ID.into()) {
            connect.set_disabled(url_empty);
        }
    }

    /// Status line text for an activated action.
    pub fn summary(self, action: &ElementId, content: &DialogContent) -> String {
        match action.as_str() {
            "cancel" | "later" => format!("{} cancelled", self.name()),
            _ if Modal::is_cancel(action) => format!("{} closed", self.name()),
            CONNECT_ID => {
                let url = content
                    .root
                    .find(&BOT_URL_ID.into())
                    .and_then(Element::value)
                    .unwrap_or_default();
                format!("Connecting to {url}")
            }
            other => format!("{}: {other}", self.name()),
        }
    }
}
