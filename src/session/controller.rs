use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::event::{EventBus, SessionEvent};
use crate::session::result::ResultStats;
use crate::session::text::{Session, TimeLimit};
use crate::store::prefs::PrefsStore;

/// Session lifecycle. `Ended` is terminal: replaying requires building a
/// fresh controller from a new or reused `Session`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputStatus {
    Unstarted,
    Started,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordStatus {
    Unreceived,
    Current,
    Correct,
    Incorrect,
}

/// Classify the word at `required` given that the cursor sits at `current`.
/// Both-absent compares equal, so positions past the end of both sequences
/// classify as correct; results only ever ask about expected positions.
pub(crate) fn word_status(
    expected: &[String],
    received: &[String],
    current: usize,
    required: usize,
) -> WordStatus {
    if required == current {
        return WordStatus::Current;
    }
    if required > current {
        return WordStatus::Unreceived;
    }
    let expected_word = expected.get(required).map(String::as_str);
    let received_word = received.get(required).map(String::as_str);
    if received_word == expected_word {
        WordStatus::Correct
    } else {
        WordStatus::Incorrect
    }
}

/// Cancellable once-per-interval tick thread. `stop` makes cancellation
/// idempotent and safe to request from the tick thread itself.
#[derive(Debug)]
struct Ticker {
    stop: Arc<AtomicBool>,
    _thread: JoinHandle<()>,
}

impl Ticker {
    fn spawn(expected: Arc<Vec<String>>, state: Arc<Mutex<State>>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = stop.clone();
        let thread = thread::spawn(move || {
            loop {
                thread::sleep(interval);
                if thread_stop.load(Ordering::Relaxed) {
                    break;
                }
                if !SessionController::advance_tick(&expected, &state, interval) {
                    break;
                }
            }
        });
        Self {
            stop,
            _thread: thread,
        }
    }

    /// Signal the thread to exit. It finishes within one interval on its
    /// own; no join, so ending a session never blocks on a sleeping tick.
    fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug)]
struct State {
    status: InputStatus,
    time_limit: TimeLimit,
    received: Vec<String>,
    cursor: usize,
    elapsed_secs: u64,
    results: Option<ResultStats>,
    ticker: Option<Ticker>,
    bus: EventBus,
}

/// Owns one practice attempt: the expected words, the received words, the
/// cursor, the lifecycle status, and the elapsed-seconds ticker. All mutable
/// state sits behind one mutex so caller methods and the tick thread
/// serialize (`results` is set exactly once, on the transition to `Ended`).
#[derive(Debug)]
pub struct SessionController {
    session: Session,
    expected: Arc<Vec<String>>,
    state: Arc<Mutex<State>>,
    tick_interval: Duration,
    prefs: Option<PrefsStore>,
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionController {
    pub fn new(session: Session, prefs: Option<PrefsStore>) -> Self {
        Self::with_tick_interval(session, prefs, Duration::from_secs(1))
    }

    /// Like `new` but with a custom tick interval. Elapsed time still counts
    /// one second per tick; shorter intervals are for tests and demos.
    pub fn with_tick_interval(
        session: Session,
        prefs: Option<PrefsStore>,
        tick_interval: Duration,
    ) -> Self {
        let time_limit = prefs
            .as_ref()
            .and_then(PrefsStore::time_limit)
            .unwrap_or_default();
        let expected = Arc::new(session.words());

        Self {
            session,
            expected,
            state: Arc::new(Mutex::new(State {
                status: InputStatus::Unstarted,
                time_limit,
                received: Vec::new(),
                cursor: 0,
                elapsed_secs: 0,
                results: None,
                ticker: None,
                bus: EventBus::new(),
            })),
            tick_interval,
            prefs,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn subscribe(&self) -> mpsc::Receiver<SessionEvent> {
        self.state_guard().bus.subscribe()
    }

    pub fn input_status(&self) -> InputStatus {
        self.state_guard().status
    }

    pub fn time_limit(&self) -> TimeLimit {
        self.state_guard().time_limit
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.state_guard().elapsed_secs
    }

    pub fn results(&self) -> Option<ResultStats> {
        self.state_guard().results.clone()
    }

    pub fn expected_word_index(&self) -> usize {
        self.state_guard().cursor
    }

    pub fn expected_word_count(&self) -> usize {
        self.expected.len()
    }

    pub fn received_word_count(&self) -> usize {
        self.state_guard().received.len()
    }

    /// Change the time limit and persist it as the new last-used value.
    pub fn set_time_limit(&self, limit: TimeLimit) {
        {
            let mut st = self.state_guard();
            if st.time_limit == limit {
                return;
            }
            st.time_limit = limit;
            st.bus.emit(SessionEvent::TimeLimitChanged(limit));
        }
        if let Some(prefs) = &self.prefs {
            // Best effort, like the rest of preference persistence.
            let _ = prefs.set_time_limit(limit);
        }
    }

    pub fn set_input_status(&self, status: InputStatus) {
        Self::transition(&self.expected, &self.state, self.tick_interval, status);
    }

    /// Single transition routine, shared between callers and the tick
    /// thread's auto-end so the limit check has one point of truth.
    fn transition(
        expected: &Arc<Vec<String>>,
        state: &Arc<Mutex<State>>,
        tick_interval: Duration,
        status: InputStatus,
    ) {
        let finished_ticker;
        {
            let mut st = lock(state);
            if st.status == status || st.status == InputStatus::Ended {
                return;
            }
            st.status = status;
            finished_ticker = match status {
                InputStatus::Started => {
                    // Count the first second up front so the elapsed display
                    // does not sit at zero while the first tick is pending.
                    st.elapsed_secs += 1;
                    let elapsed = st.elapsed_secs;
                    st.bus.emit(SessionEvent::Tick(elapsed));
                    st.ticker = Some(Ticker::spawn(
                        expected.clone(),
                        state.clone(),
                        tick_interval,
                    ));
                    None
                }
                InputStatus::Ended => {
                    let results = ResultStats::calculate(
                        expected,
                        &st.received,
                        st.cursor,
                        st.time_limit,
                        st.elapsed_secs,
                    );
                    st.results = Some(results);
                    st.ticker.take()
                }
                InputStatus::Unstarted => None,
            };
            st.bus.emit(SessionEvent::StatusChanged(status));
        }
        // Cancel (via Drop) outside the lock; a tick mid-flight sees Ended
        // and exits without touching the counters.
        drop(finished_ticker);
    }

    /// One elapsed second. Returns false once the session has ended and the
    /// tick thread should exit.
    fn advance_tick(
        expected: &Arc<Vec<String>>,
        state: &Arc<Mutex<State>>,
        tick_interval: Duration,
    ) -> bool {
        let limit_reached;
        {
            let mut st = lock(state);
            if st.status == InputStatus::Ended {
                return false;
            }
            st.elapsed_secs += 1;
            let elapsed = st.elapsed_secs;
            st.bus.emit(SessionEvent::Tick(elapsed));
            limit_reached = st.time_limit.secs() > 0 && elapsed >= st.time_limit.secs();
        }
        if limit_reached {
            Self::transition(expected, state, tick_interval, InputStatus::Ended);
            return false;
        }
        true
    }

    /// Move the cursor. Negative indices are ignored. Rewinding truncates
    /// the received words to `index + 1`, so backspacing past submitted
    /// words erases them.
    pub fn set_expected_index(&self, index: isize) {
        if index < 0 {
            return;
        }
        let index = index as usize;
        let mut st = self.state_guard();
        if index < st.cursor {
            st.received.truncate(index + 1);
        }
        st.cursor = index;
        st.bus.emit(SessionEvent::CursorMoved(index));
    }

    /// Set the received word at `index`, overwriting any prior value.
    /// Writing past the end fills the gap with empty words.
    pub fn add_received_word(&self, index: usize, word: impl Into<String>) {
        let mut st = self.state_guard();
        if index >= st.received.len() {
            st.received.resize(index + 1, String::new());
        }
        st.received[index] = word.into();
        st.bus.emit(SessionEvent::WordReceived(index));
    }

    pub fn expected_word_at(&self, index: usize) -> Option<&str> {
        self.expected.get(index).map(String::as_str)
    }

    pub fn received_word_at(&self, index: usize) -> Option<String> {
        self.state_guard().received.get(index).cloned()
    }

    pub fn get_word_status(&self, current_index: usize, required_index: usize) -> WordStatus {
        let st = self.state_guard();
        word_status(&self.expected, &st.received, current_index, required_index)
    }

    fn state_guard(&self) -> MutexGuard<'_, State> {
        lock(&self.state)
    }

    #[cfg(test)]
    fn simulate_tick(&self) -> bool {
        Self::advance_tick(&self.expected, &self.state, self.tick_interval)
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        let ticker = self.state_guard().ticker.take();
        drop(ticker);
    }
}
