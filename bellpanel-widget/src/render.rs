use bellpanel_shared::domain::NotificationRecord;
use serde::{Deserialize, Serialize};
use tinytemplate::TinyTemplate;

use crate::dropdown::DropdownState;
use crate::transition::{Phase, Transition, join_classes};

const DROPDOWN_TEMPLATE: &str = include_str!("../templates/dropdown.html");

pub const DEFAULT_TITLE: &str = "Notifications";
pub const DEFAULT_EMPTY_MESSAGE: &str = "No notifications available";

const TRIGGER_CLASS: &str = "w-8 h-8 flex items-center justify-center bg-slate-100 hover:bg-slate-200 dark:bg-slate-700 dark:hover:bg-slate-600/80 rounded-full";
const TRIGGER_OPEN_CLASS: &str = "bg-slate-200";
const PANEL_CLASS: &str = "origin-top-right z-10 absolute top-full -mr-48 sm:mr-0 min-w-80 bg-white dark:bg-slate-800 border border-slate-200 dark:border-slate-700 py-1.5 rounded shadow-lg overflow-hidden mt-1";

/// Edge of the trigger the panel is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
}

impl Align {
    fn class(self) -> &'static str {
        match self {
            Align::Left => "left-0",
            Align::Right => "right-0",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("render: {0}")]
pub struct RenderError(String);

/// Everything the markup depends on.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub state: DropdownState,
    pub align: Align,
    pub phase: Phase,
    pub transition: &'a Transition,
    pub notifications: &'a [NotificationRecord],
    pub empty_message: &'a str,
}

#[derive(Serialize)]
struct WidgetView<'a> {
    state: DropdownState,
    open: bool,
    title: &'a str,
    trigger_class: String,
    panel_visible: bool,
    panel_class: String,
    notifications: Vec<EntryView<'a>>,
    is_empty: bool,
    empty_message: &'a str,
}

#[derive(Serialize)]
struct EntryView<'a> {
    icon: Option<&'a str>,
    message: &'a str,
    date: &'a str,
    href: &'a str,
}

pub fn render(input: &RenderInput<'_>) -> Result<String, RenderError> {
    let open = input.state.is_open();
    let trigger_class = if open {
        join_classes([TRIGGER_CLASS, TRIGGER_OPEN_CLASS])
    } else {
        TRIGGER_CLASS.to_string()
    };
    let animation = input.transition.classes(open, input.phase);
    let panel_class = join_classes([PANEL_CLASS, input.align.class(), animation.as_str()]);
    let view = WidgetView {
        state: input.state,
        open,
        title: DEFAULT_TITLE,
        trigger_class,
        panel_visible: input.transition.visible(open, input.phase),
        panel_class,
        notifications: input
            .notifications
            .iter()
            .map(|n| EntryView {
                icon: n.icon.as_deref().filter(|i| !i.is_empty()),
                message: &n.message,
                date: &n.date,
                href: n.target(),
            })
            .collect(),
        is_empty: input.notifications.is_empty(),
        empty_message: input.empty_message,
    };

    let mut tt = TinyTemplate::new();
    tt.add_template("dropdown", DROPDOWN_TEMPLATE)
        .map_err(|e| RenderError(format!("template: {e}")))?;
    tt.render("dropdown", &view)
        .map_err(|e| RenderError(e.to_string()))
}
