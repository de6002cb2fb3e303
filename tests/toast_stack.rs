use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use railshell::modules::toast::{
    Announcement, ExitToken, PresentationAdapter, Slot, ToastId, ToastRequest, ToastStack,
    ToastState, ToastView, Variant, BASE_Z, MAX_VISIBLE,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Render(ToastId, ToastState),
    BeginExit(ToastId),
    Reposition(Vec<Slot>),
}

/// Records every adapter call and holds exit tokens until the test releases them.
#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
    exits: Rc<RefCell<Vec<ExitToken>>>,
    views: Rc<RefCell<Vec<ToastView>>>,
}

impl Recorder {
    fn finish_exits(&self) {
        let exits: Vec<_> = self.exits.borrow_mut().drain(..).collect();
        for exit in exits {
            exit.complete();
        }
    }

    fn last_slots(&self) -> Vec<Slot> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find_map(|call| match call {
                Call::Reposition(slots) => Some(slots.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn exits_begun(&self) -> Vec<ToastId> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::BeginExit(id) => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl PresentationAdapter for Recorder {
    fn render(&mut self, view: &ToastView) {
        self.calls.borrow_mut().push(Call::Render(view.id, view.state));
        self.views.borrow_mut().push(view.clone());
    }

    fn begin_exit(&mut self, exit: ExitToken) {
        self.calls.borrow_mut().push(Call::BeginExit(exit.id()));
        self.exits.borrow_mut().push(exit);
    }

    fn reposition(&mut self, slots: &[Slot]) {
        self.calls.borrow_mut().push(Call::Reposition(slots.to_vec()));
    }
}

fn titled(title: &str) -> ToastRequest {
    ToastRequest::new().title(title).persistent()
}

fn titles(stack: &ToastStack) -> Vec<String> {
    stack
        .snapshot()
        .into_iter()
        .filter(|v| v.state.is_live())
        .map(|v| v.title)
        .collect()
}

#[test]
fn never_more_than_capacity_live() {
    let recorder = Recorder::default();
    let stack = ToastStack::new(recorder.clone());

    for i in 0..10 {
        stack.show(titled(&format!("t{i}")));
        assert!(stack.live_count() <= MAX_VISIBLE);
        if i % 3 == 0 {
            recorder.finish_exits();
        }
        stack.frame_committed();
    }
    assert_eq!(stack.live_count(), MAX_VISIBLE);
}

#[test]
fn newest_is_first_and_on_top() {
    let recorder = Recorder::default();
    let stack = ToastStack::new(recorder.clone());
    let a = stack.show(titled("a")).id().unwrap();
    let b = stack.show(titled("b")).id().unwrap();
    let c = stack.show(titled("c")).id().unwrap();

    assert_eq!(titles(&stack), ["c", "b", "a"]);
    let slots = recorder.last_slots();
    let order: Vec<_> = slots.iter().map(|s| s.id).collect();
    assert_eq!(order, [c, b, a]);
    assert_eq!(slots[0].z, BASE_Z);
    assert!(slots.windows(2).all(|w| w[0].z > w[1].z));
}

#[test]
fn fourth_toast_evicts_the_oldest() {
    let recorder = Recorder::default();
    let stack = ToastStack::new(recorder.clone());
    let a = stack.show(titled("a")).id().unwrap();
    stack.show(titled("b"));
    stack.show(titled("c"));
    stack.frame_committed();

    stack.show(titled("d"));
    assert_eq!(recorder.exits_begun(), [a]);
    assert_eq!(stack.state_of(a), Some(ToastState::Dismissing));
    assert_eq!(titles(&stack), ["d", "c", "b"]);

    recorder.finish_exits();
    assert_eq!(stack.state_of(a), None);
    assert_eq!(stack.len(), 3);
}

#[test]
fn repeated_dismissal_has_one_effect() {
    let recorder = Recorder::default();
    let stack = ToastStack::new(recorder.clone());
    let handle = stack.show(titled("once"));
    stack.frame_committed();

    handle.dismiss();
    handle.dismiss();
    assert!(!stack.dismiss(handle.id().unwrap()));
    assert_eq!(recorder.exits_begun().len(), 1);

    recorder.finish_exits();
    handle.dismiss();
    assert!(stack.is_empty());
    assert_eq!(recorder.exits_begun().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn manual_dismissal_cancels_the_timer() {
    let recorder = Recorder::default();
    let stack = ToastStack::new(recorder.clone());
    let handle = stack.show(ToastRequest::new().title("short").timeout_ms(1000));
    stack.frame_committed();

    handle.dismiss();
    recorder.finish_exits();
    assert_eq!(stack.next_deadline(), None);

    tokio::time::advance(Duration::from_millis(1500)).await;
    stack.tick();
    assert_eq!(recorder.exits_begun().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn timeout_dismisses_on_schedule() {
    let recorder = Recorder::default();
    let stack = ToastStack::new(recorder.clone());
    let id = stack.show(ToastRequest::new()).id().unwrap();
    stack.frame_committed();

    tokio::time::advance(Duration::from_millis(3999)).await;
    stack.tick();
    assert_eq!(stack.state_of(id), Some(ToastState::Visible));

    tokio::time::advance(Duration::from_millis(1)).await;
    stack.tick();
    assert_eq!(stack.state_of(id), Some(ToastState::Dismissing));
}

#[test]
fn removing_the_middle_toast_closes_the_gap() {
    let recorder = Recorder::default();
    let stack = ToastStack::new(recorder.clone());
    let a = stack.show(titled("a")).id().unwrap();
    let b = stack.show(titled("b")).id().unwrap();
    let c = stack.show(titled("c")).id().unwrap();
    stack.frame_committed();

    stack.dismiss(b);
    recorder.finish_exits();

    let slots = recorder.last_slots();
    assert_eq!(
        slots,
        [
            Slot { id: c, index: 0, z: BASE_Z },
            Slot { id: a, index: 1, z: BASE_Z - 1 },
        ]
    );
}

#[test]
fn persistent_success_toast_walks_every_state() {
    let recorder = Recorder::default();
    let stack = ToastStack::new(recorder.clone());
    let handle = stack.show(
        ToastRequest::new()
            .title("Tasks synced")
            .message("All tasks are up to date.")
            .variant(Variant::Success)
            .persistent(),
    );
    let id = handle.id().unwrap();
    assert_eq!(stack.next_deadline(), None);

    stack.frame_committed();
    handle.dismiss();
    recorder.finish_exits();

    let states: Vec<_> = recorder
        .calls
        .borrow()
        .iter()
        .filter_map(|call| match call {
            Call::Render(rid, state) if *rid == id => Some(*state),
            _ => None,
        })
        .collect();
    assert_eq!(
        states,
        [
            ToastState::Entrance,
            ToastState::Visible,
            ToastState::Dismissing,
            ToastState::Removed,
        ]
    );

    let first = recorder.views.borrow()[0].clone();
    assert_eq!(first.title, "Tasks synced");
    assert_eq!(first.message.as_deref(), Some("All tasks are up to date."));
    assert_eq!(first.announcement(), Announcement::Status);
    assert!(stack.is_empty());
}

#[test]
fn rapid_fire_keeps_the_newest_three() {
    let recorder = Recorder::default();
    let stack = ToastStack::new(recorder.clone());
    let ids: Vec<_> = (0..5)
        .map(|i| stack.show(titled(&format!("t{i}"))).id().unwrap())
        .collect();

    assert_eq!(titles(&stack), ["t4", "t3", "t2"]);
    assert_eq!(recorder.exits_begun(), [ids[0], ids[1]]);

    stack.frame_committed();
    assert_eq!(stack.visible_count(), 3);
    recorder.finish_exits();
    assert_eq!(stack.len(), 3);
    let order: Vec<_> = recorder.last_slots().iter().map(|s| s.id).collect();
    assert_eq!(order, [ids[4], ids[3], ids[2]]);
}

#[test]
fn error_toasts_interrupt() {
    let recorder = Recorder::default();
    let stack = ToastStack::new(recorder.clone());
    stack.show(ToastRequest::new().variant(Variant::Error).message("Disk full"));

    let view = &stack.snapshot()[0];
    assert_eq!(view.title, "Notification");
    assert_eq!(view.announcement(), Announcement::Alert);
}

#[test]
fn eviction_skips_a_toast_dismissed_out_of_order() {
    let recorder = Recorder::default();
    let stack = ToastStack::new(recorder.clone());
    let a = stack.show(titled("a")).id().unwrap();
    let b = stack.show(titled("b")).id().unwrap();
    stack.show(titled("c"));
    stack.frame_committed();

    stack.dismiss(b);
    recorder.finish_exits();

    stack.show(titled("d"));
    stack.frame_committed();
    assert_eq!(stack.state_of(a), Some(ToastState::Visible));
    assert_eq!(titles(&stack), ["d", "c", "a"]);

    stack.show(titled("e"));
    assert_eq!(stack.state_of(a), Some(ToastState::Dismissing));
    assert_eq!(recorder.exits_begun(), [b, a]);
    assert_eq!(titles(&stack), ["e", "d", "c"]);
}
