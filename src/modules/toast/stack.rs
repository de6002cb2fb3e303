use chrono::{DateTime, Local};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::presentation::{PresentationAdapter, Slot, ToastView};
use super::request::{Toast, ToastRequest};

/// Maximum number of live (entering or visible) toasts.
pub const MAX_VISIBLE: usize = 3;

/// Stacking priority of the newest toast; older ones count down from here.
pub const BASE_Z: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastState {
    Entrance,
    Visible,
    Dismissing,
    Removed,
}

impl ToastState {
    /// Live entries count against the capacity.
    pub fn is_live(self) -> bool {
        matches!(self, ToastState::Entrance | ToastState::Visible)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DismissReason {
    Timeout,
    Capacity,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerId(u64);

#[derive(Debug)]
struct Timer {
    id: TimerId,
    entry: ToastId,
    due: Instant,
}

#[derive(Debug)]
struct ToastEntry {
    id: ToastId,
    toast: Toast,
    state: ToastState,
    created_at: DateTime<Local>,
    timer: Option<TimerId>,
}

impl ToastEntry {
    fn view(&self) -> ToastView {
        ToastView {
            id: self.id,
            title: self.toast.title.clone(),
            message: self.toast.message.clone(),
            variant: self.toast.variant,
            state: self.state,
            created_at: self.created_at,
        }
    }
}

enum Instruction {
    Render(ToastView),
    BeginExit(ToastId),
    Reposition(Vec<Slot>),
}

struct State {
    /// Newest first. Dismissing entries stay until their exit completes.
    entries: Vec<ToastEntry>,
    timers: Vec<Timer>,
    capacity: usize,
    next_id: u64,
    next_timer: u64,
}

impl State {
    fn live_count(&self) -> usize {
        self.entries.iter().filter(|e| e.state.is_live()).count()
    }

    fn slots(&self) -> Vec<Slot> {
        self.entries
            .iter()
            .filter(|e| e.state.is_live())
            .enumerate()
            .map(|(index, e)| Slot {
                id: e.id,
                index,
                z: BASE_Z - index as i32,
            })
            .collect()
    }

    fn arm_timer(&mut self, entry: ToastId, due: Instant) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.push(Timer { id, entry, due });
        id
    }

    fn begin_dismiss(
        &mut self,
        id: ToastId,
        reason: DismissReason,
        out: &mut Vec<Instruction>,
    ) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if !entry.state.is_live() {
            return false;
        }

        entry.state = ToastState::Dismissing;
        if let Some(timer) = entry.timer.take() {
            self.timers.retain(|t| t.id != timer);
        }
        debug!(toast = %id, ?reason, "toast dismissing");

        out.push(Instruction::Render(entry.view()));
        out.push(Instruction::BeginExit(id));
        true
    }
}

struct Shared {
    state: RefCell<State>,
    adapter: RefCell<Option<Box<dyn PresentationAdapter>>>,
    mounted: bool,
    outbox: RefCell<VecDeque<Instruction>>,
    dispatching: Cell<bool>,
}

/// Bounded, newest-first stack of toast notifications.
///
/// Cloning yields another handle to the same stack. All state changes happen
/// synchronously on the caller's thread; the adapter is driven afterwards from
/// an instruction queue, so adapter callbacks may re-enter the stack.
#[derive(Clone)]
pub struct ToastStack {
    shared: Rc<Shared>,
}

impl ToastStack {
    pub fn new(adapter: impl PresentationAdapter + 'static) -> Self {
        Self::with_capacity(adapter, MAX_VISIBLE)
    }

    pub fn with_capacity(adapter: impl PresentationAdapter + 'static, capacity: usize) -> Self {
        Self::build(Some(Box::new(adapter)), capacity)
    }

    /// A stack with no presentation root. `show()` does nothing.
    pub fn detached() -> Self {
        Self::build(None, MAX_VISIBLE)
    }

    pub fn mount(root: Option<Box<dyn PresentationAdapter>>) -> Self {
        Self::build(root, MAX_VISIBLE)
    }

    fn build(adapter: Option<Box<dyn PresentationAdapter>>, capacity: usize) -> Self {
        let mounted = adapter.is_some();
        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(State {
                    entries: Vec::new(),
                    timers: Vec::new(),
                    capacity: capacity.max(1),
                    next_id: 0,
                    next_timer: 0,
                }),
                adapter: RefCell::new(adapter),
                mounted,
                outbox: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
            }),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.mounted
    }

    pub fn capacity(&self) -> usize {
        self.shared.state.borrow().capacity
    }

    /// Shows a toast, evicting the oldest live one first when at capacity.
    pub fn show(&self, request: ToastRequest) -> DismissHandle {
        if !self.shared.mounted {
            debug!("no presentation root; toast dropped");
            return DismissHandle::inert();
        }

        let toast = request.resolve();
        let now = Instant::now();
        let mut out = Vec::new();
        let id = {
            let mut state = self.shared.state.borrow_mut();
            while state.live_count() >= state.capacity {
                let Some(oldest) = state
                    .entries
                    .iter()
                    .rev()
                    .find(|e| e.state.is_live())
                    .map(|e| e.id)
                else {
                    break;
                };
                info!(toast = %oldest, capacity = state.capacity, "evicting oldest toast");
                state.begin_dismiss(oldest, DismissReason::Capacity, &mut out);
            }

            let id = ToastId(state.next_id);
            state.next_id += 1;
            let timer = toast.timeout.map(|timeout| state.arm_timer(id, now + timeout));

            debug!(
                toast = %id,
                variant = toast.variant.name(),
                timeout = ?toast.timeout,
                "toast shown"
            );
            let entry = ToastEntry {
                id,
                toast,
                state: ToastState::Entrance,
                created_at: Local::now(),
                timer,
            };
            out.push(Instruction::Render(entry.view()));
            state.entries.insert(0, entry);
            out.push(Instruction::Reposition(state.slots()));
            id
        };

        self.enqueue(out);
        self.flush();
        DismissHandle {
            id: Some(id),
            stack: Rc::downgrade(&self.shared),
        }
    }

    /// Starts dismissal of a live toast. Returns whether anything changed.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.dismiss_with(id, DismissReason::User)
    }

    fn dismiss_with(&self, id: ToastId, reason: DismissReason) -> bool {
        let mut out = Vec::new();
        let changed = self
            .shared
            .state
            .borrow_mut()
            .begin_dismiss(id, reason, &mut out);
        self.enqueue(out);
        self.flush();
        changed
    }

    /// Promotes every entering toast to visible. Call after a frame is drawn.
    pub fn frame_committed(&self) {
        let mut out = Vec::new();
        {
            let mut state = self.shared.state.borrow_mut();
            for entry in state
                .entries
                .iter_mut()
                .filter(|e| e.state == ToastState::Entrance)
            {
                entry.state = ToastState::Visible;
                out.push(Instruction::Render(entry.view()));
            }
        }
        self.enqueue(out);
        self.flush();
    }

    /// Fires every auto-dismiss timer that is due.
    pub fn tick(&self) {
        let now = Instant::now();
        let mut out = Vec::new();
        {
            let mut state = self.shared.state.borrow_mut();
            let (due, pending): (Vec<Timer>, Vec<Timer>) = std::mem::take(&mut state.timers)
                .into_iter()
                .partition(|t| t.due <= now);
            state.timers = pending;

            for timer in due {
                let armed = state
                    .entries
                    .iter()
                    .any(|e| e.id == timer.entry && e.timer == Some(timer.id));
                if armed {
                    state.begin_dismiss(timer.entry, DismissReason::Timeout, &mut out);
                } else {
                    debug!(toast = %timer.entry, "stale timer ignored");
                }
            }
        }
        self.enqueue(out);
        self.flush();
    }

    /// Earliest pending auto-dismiss deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.shared.state.borrow().timers.iter().map(|t| t.due).min()
    }

    /// Drops a dismissing toast once its exit animation has finished.
    pub fn on_exit_complete(&self, id: ToastId) {
        let mut out = Vec::new();
        {
            let mut state = self.shared.state.borrow_mut();
            let Some(pos) = state.entries.iter().position(|e| e.id == id) else {
                debug!(toast = %id, "exit completion for unknown toast");
                return;
            };
            if state.entries[pos].state != ToastState::Dismissing {
                warn!(
                    toast = %id,
                    state = ?state.entries[pos].state,
                    "exit completion before dismissal ignored"
                );
                return;
            }

            let mut entry = state.entries.remove(pos);
            entry.state = ToastState::Removed;
            debug!(
                toast = %id,
                lived_ms = (Local::now() - entry.created_at).num_milliseconds(),
                "toast removed"
            );
            out.push(Instruction::Render(entry.view()));
            out.push(Instruction::Reposition(state.slots()));
        }
        self.enqueue(out);
        self.flush();
    }

    pub fn snapshot(&self) -> Vec<ToastView> {
        self.shared
            .state
            .borrow()
            .entries
            .iter()
            .map(ToastEntry::view)
            .collect()
    }

    pub fn slots(&self) -> Vec<Slot> {
        self.shared.state.borrow().slots()
    }

    /// `None` once the toast has been removed (or never existed).
    pub fn state_of(&self, id: ToastId) -> Option<ToastState> {
        self.shared
            .state
            .borrow()
            .entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.state)
    }

    pub fn visible_count(&self) -> usize {
        self.count(|s| s == ToastState::Visible)
    }

    pub fn live_count(&self) -> usize {
        self.shared.state.borrow().live_count()
    }

    pub fn newest_live(&self) -> Option<ToastId> {
        self.shared
            .state
            .borrow()
            .entries
            .iter()
            .find(|e| e.state.is_live())
            .map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.shared.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn count(&self, pred: impl Fn(ToastState) -> bool) -> usize {
        self.shared
            .state
            .borrow()
            .entries
            .iter()
            .filter(|e| pred(e.state))
            .count()
    }

    fn enqueue(&self, out: Vec<Instruction>) {
        self.shared.outbox.borrow_mut().extend(out);
    }

    /// Drains the outbox into the adapter. Nested calls only enqueue.
    fn flush(&self) {
        if self.shared.dispatching.replace(true) {
            return;
        }
        loop {
            let next = self.shared.outbox.borrow_mut().pop_front();
            let Some(instruction) = next else {
                break;
            };
            let mut adapter = self.shared.adapter.borrow_mut();
            let Some(adapter) = adapter.as_mut() else {
                continue;
            };
            match instruction {
                Instruction::Render(view) => adapter.render(&view),
                Instruction::BeginExit(id) => adapter.begin_exit(ExitToken {
                    id,
                    stack: Rc::downgrade(&self.shared),
                }),
                Instruction::Reposition(slots) => adapter.reposition(&slots),
            }
        }
        self.shared.dispatching.set(false);
    }
}

/// Idempotent handle that dismisses the toast it was issued for.
#[derive(Debug, Clone)]
pub struct DismissHandle {
    id: Option<ToastId>,
    stack: Weak<Shared>,
}

impl DismissHandle {
    fn inert() -> Self {
        Self {
            id: None,
            stack: Weak::new(),
        }
    }

    pub fn id(&self) -> Option<ToastId> {
        self.id
    }

    pub fn is_inert(&self) -> bool {
        self.id.is_none()
    }

    pub fn dismiss(&self) {
        if let (Some(id), Some(shared)) = (self.id, self.stack.upgrade()) {
            ToastStack { shared }.dismiss(id);
        }
    }
}

/// One-shot completion callback for an exit animation.
#[must_use = "an exit token that is never completed leaves its toast dismissing"]
#[derive(Debug)]
pub struct ExitToken {
    id: ToastId,
    stack: Weak<Shared>,
}

impl ExitToken {
    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn complete(self) {
        if let Some(shared) = self.stack.upgrade() {
            ToastStack { shared }.on_exit_complete(self.id);
        }
    }
}
