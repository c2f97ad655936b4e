use bellpanel_shared::domain::NotificationRecord;
use bellpanel_widget::DropdownState;
use bellpanel_widget::render::{Align, DEFAULT_EMPTY_MESSAGE, RenderInput, render};
use bellpanel_widget::transition::{Phase, Transition};

fn input<'a>(
    state: DropdownState,
    phase: Phase,
    transition: &'a Transition,
    notifications: &'a [NotificationRecord],
) -> RenderInput<'a> {
    RenderInput {
        state,
        align: Align::Right,
        phase,
        transition,
        notifications,
        empty_message: DEFAULT_EMPTY_MESSAGE,
    }
}

#[test]
fn closed_panel_is_not_rendered() {
    let t = Transition::default();
    let html = render(&input(DropdownState::Closed, Phase::End, &t, &[])).unwrap();
    assert!(html.contains(r#"aria-expanded="false""#));
    assert!(html.contains(r#"aria-haspopup="true""#));
    assert!(html.contains(r#"data-state="closed""#));
    assert!(!html.contains("No notifications available"));
    assert!(!html.contains("bg-slate-200\""), "closed trigger must not be highlighted");
}

#[test]
fn open_panel_carries_enter_classes_and_alignment() {
    let t = Transition::default();
    let html = render(&input(DropdownState::Open, Phase::End, &t, &[])).unwrap();
    assert!(html.contains(r#"aria-expanded="true""#));
    assert!(html.contains("rounded-full bg-slate-200"));
    assert!(html.contains("right-0 transition ease-out duration-200 transform opacity-100 translate-y-0"));
    assert!(html.contains("No notifications available"));

    let start = render(&input(DropdownState::Open, Phase::Start, &t, &[])).unwrap();
    assert!(start.contains("opacity-0 -translate-y-2"));

    let mut left = input(DropdownState::Open, Phase::End, &t, &[]);
    left.align = Align::Left;
    assert!(render(&left).unwrap().contains("left-0"));
}

#[test]
fn leaving_panel_stays_until_animation_ends() {
    let t = Transition::default();
    let leaving = render(&input(DropdownState::Closed, Phase::Start, &t, &[])).unwrap();
    assert!(leaving.contains("transition ease-out duration-200 opacity-100"));
    assert!(leaving.contains("No notifications available"));
    assert!(!t.visible(false, Phase::End));
    assert!(t.visible(true, Phase::Start));
}

#[test]
fn entries_are_escaped_and_fall_back_to_placeholder_link() {
    let t = Transition::default();
    let records = vec![
        NotificationRecord::new("<script>alert(1)</script> & more", "Today").with_icon("🔔"),
        NotificationRecord::new("Plain", "Yesterday").with_link("/inbox"),
        NotificationRecord::new("Blank link", "Earlier").with_link(""),
    ];
    let html = render(&input(DropdownState::Open, Phase::End, &t, &records)).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("🔔 <span"));
    assert!(html.contains(r#"href="/inbox" data-index="1""#));
    assert_eq!(html.matches(r##"href="#0""##).count(), 2);
    assert!(!html.contains("No notifications available"));
}

#[test]
fn custom_transition_and_empty_message() {
    let t = Transition {
        enter: "fade-in".into(),
        enter_start: "a".into(),
        enter_end: "b".into(),
        leave: "fade-out".into(),
        leave_start: "c".into(),
        leave_end: "d".into(),
    };
    assert_eq!(t.classes(true, Phase::End), "fade-in b");
    assert_eq!(t.classes(false, Phase::Start), "fade-out c");

    let mut i = input(DropdownState::Open, Phase::End, &t, &[]);
    i.empty_message = "All caught up";
    let html = render(&i).unwrap();
    assert!(html.contains("All caught up"));
    assert!(html.contains("fade-in b"));
}
