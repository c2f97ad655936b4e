/// Point within an enter or leave animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    Start,
    #[default]
    End,
}

/// Class names applied while the panel animates in and out. Cosmetic only;
/// nothing here feeds back into widget state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub enter: String,
    pub enter_start: String,
    pub enter_end: String,
    pub leave: String,
    pub leave_start: String,
    pub leave_end: String,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            enter: "transition ease-out duration-200 transform".into(),
            enter_start: "opacity-0 -translate-y-2".into(),
            enter_end: "opacity-100 translate-y-0".into(),
            leave: "transition ease-out duration-200".into(),
            leave_start: "opacity-100".into(),
            leave_end: "opacity-0".into(),
        }
    }
}

impl Transition {
    pub fn classes(&self, show: bool, phase: Phase) -> String {
        let (base, step) = match (show, phase) {
            (true, Phase::Start) => (&self.enter, &self.enter_start),
            (true, Phase::End) => (&self.enter, &self.enter_end),
            (false, Phase::Start) => (&self.leave, &self.leave_start),
            (false, Phase::End) => (&self.leave, &self.leave_end),
        };
        join_classes([base.as_str(), step.as_str()])
    }

    /// The panel stays in the tree until the leave animation has finished.
    pub fn visible(&self, show: bool, phase: Phase) -> bool {
        show || phase == Phase::Start
    }
}

pub(crate) fn join_classes<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
