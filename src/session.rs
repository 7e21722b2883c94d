use crate::exercise::{Exercise, ExerciseList};
use crate::interval::{CountdownDuration, IntervalDraft, InvalidInterval};
use rand::Rng;

/// Outcome of advancing the countdown by one second.
#[derive(Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is stopped, nothing changed.
    Idle,
    /// One second elapsed, countdown still in progress.
    Counting,
    /// Countdown expired: a fresh exercise was drawn for the next round,
    /// `None` when the list is empty.
    Expired(Option<Exercise>),
}

/// All countdown state. Owned by the running app, never persisted.
pub struct State {
    pub exercises: ExerciseList,
    interval: CountdownDuration,
    remaining: CountdownDuration,
    pub timer_is_stopped: bool,
    current_exercise: Option<Exercise>,
}

impl State {
    pub fn new(exercises: ExerciseList, interval: CountdownDuration) -> State {
        State {
            exercises,
            interval,
            remaining: interval,
            timer_is_stopped: true,
            current_exercise: None,
        }
    }

    pub fn interval(&self) -> CountdownDuration {
        self.interval
    }

    pub fn time_remaining(&self) -> CountdownDuration {
        self.remaining
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.current_exercise.as_ref()
    }

    pub fn timer_is_active(&self) -> bool {
        !self.timer_is_stopped
    }

    /// Advances the countdown by one second. On expiry a new exercise is
    /// drawn and the countdown resets to the committed interval; the timer
    /// keeps running either way.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        if self.timer_is_stopped {
            return TickOutcome::Idle;
        }

        let secs = self.remaining.as_secs();
        if secs > 1 {
            self.remaining = CountdownDuration::from_secs(secs - 1);
            TickOutcome::Counting
        } else {
            TickOutcome::Expired(self.reselect(rng))
        }
    }

    fn reselect<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Exercise> {
        let drawn = self.exercises.select_random(rng);
        self.current_exercise = drawn.clone();
        self.remaining = self.interval;
        drawn
    }

    /// Starts or pauses the countdown. The first start draws an exercise
    /// immediately, before any time has elapsed.
    pub fn toggle_timer<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.timer_is_stopped = !self.timer_is_stopped;
        if !self.timer_is_stopped && self.current_exercise.is_none() {
            self.current_exercise = self.exercises.select_random(rng);
        }
    }

    /// Draws a new exercise and restarts the countdown without waiting for
    /// expiry. Only meaningful while running; ignored otherwise.
    pub fn skip_exercise<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.timer_is_stopped {
            return;
        }
        self.reselect(rng);
    }

    /// Commits an edited interval and restarts the countdown from it.
    /// A zero draft is rejected and the prior interval stays committed.
    pub fn apply_interval(&mut self, draft: &IntervalDraft) -> Result<(), InvalidInterval> {
        let committed = draft.apply()?;
        self.interval = committed;
        self.remaining = committed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::ExerciseList;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn running_state(interval_secs: u64) -> (State, StdRng) {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = State::new(
            ExerciseList::default(),
            CountdownDuration::from_secs(interval_secs),
        );
        state.toggle_timer(&mut rng);
        (state, rng)
    }

    #[test]
    fn tick_while_stopped_changes_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = State::new(ExerciseList::default(), CountdownDuration::from_secs(5));

        assert_eq!(state.tick(&mut rng), TickOutcome::Idle);
        assert_eq!(state.time_remaining().as_secs(), 5);
        assert!(state.current_exercise().is_none());
    }

    #[test]
    fn first_start_draws_an_exercise_without_decrementing() {
        let (state, _rng) = running_state(5);

        assert!(state.current_exercise().is_some());
        assert_eq!(state.time_remaining().as_secs(), 5);
    }

    #[test]
    fn countdown_expires_after_interval_ticks() {
        let (mut state, mut rng) = running_state(5);

        let mut expiries = 0;
        for _ in 0..5 {
            if let TickOutcome::Expired(drawn) = state.tick(&mut rng) {
                expiries += 1;
                assert!(drawn.is_some());
            }
        }

        assert_eq!(expiries, 1);
        assert_eq!(state.time_remaining().as_secs(), 5);
        assert!(state.timer_is_active());
    }

    #[test]
    fn expiry_resets_to_the_committed_interval() {
        let (mut state, mut rng) = running_state(3);

        assert_eq!(state.tick(&mut rng), TickOutcome::Counting);
        assert_eq!(state.time_remaining().as_secs(), 2);
        assert_eq!(state.tick(&mut rng), TickOutcome::Counting);
        assert_eq!(state.time_remaining().as_secs(), 1);
        assert!(matches!(state.tick(&mut rng), TickOutcome::Expired(Some(_))));
        assert_eq!(state.time_remaining().as_secs(), 3);
    }

    #[test]
    fn pause_retains_remaining_time_and_exercise() {
        let (mut state, mut rng) = running_state(10);

        state.tick(&mut rng);
        state.tick(&mut rng);
        let exercise_before = state.current_exercise().cloned();
        state.toggle_timer(&mut rng);

        assert!(state.timer_is_stopped);
        assert_eq!(state.time_remaining().as_secs(), 8);
        assert_eq!(state.current_exercise().cloned(), exercise_before);

        assert_eq!(state.tick(&mut rng), TickOutcome::Idle);
        assert_eq!(state.time_remaining().as_secs(), 8);
    }

    #[test]
    fn expiry_with_an_empty_list_keeps_ticking() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = State::new(ExerciseList::new(vec![]), CountdownDuration::from_secs(2));
        state.toggle_timer(&mut rng);

        state.tick(&mut rng);
        assert_eq!(state.tick(&mut rng), TickOutcome::Expired(None));

        assert!(state.timer_is_active());
        assert!(state.current_exercise().is_none());
        assert_eq!(state.time_remaining().as_secs(), 2);
    }

    #[test]
    fn skip_reselects_and_restarts_the_countdown() {
        let (mut state, mut rng) = running_state(10);

        state.tick(&mut rng);
        state.tick(&mut rng);
        assert_eq!(state.time_remaining().as_secs(), 8);

        state.skip_exercise(&mut rng);

        assert!(state.current_exercise().is_some());
        assert_eq!(state.time_remaining().as_secs(), 10);
    }

    #[test]
    fn skip_while_stopped_is_ignored() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = State::new(ExerciseList::default(), CountdownDuration::from_secs(10));

        state.skip_exercise(&mut rng);

        assert!(state.current_exercise().is_none());
        assert_eq!(state.time_remaining().as_secs(), 10);
    }

    #[test]
    fn apply_interval_commits_and_resets() {
        let (mut state, mut rng) = running_state(10);
        state.tick(&mut rng);

        let draft = IntervalDraft::from_duration(CountdownDuration::from_secs(90));
        state.apply_interval(&draft).expect("positive total");

        assert_eq!(state.interval().as_secs(), 90);
        assert_eq!(state.time_remaining().as_secs(), 90);
    }

    #[test]
    fn apply_interval_keeps_the_prior_value_on_a_zero_draft() {
        let (mut state, mut rng) = running_state(10);
        state.tick(&mut rng);

        let draft = IntervalDraft {
            hours: "0".to_string(),
            minutes: "0".to_string(),
            seconds: "0".to_string(),
        };

        assert_eq!(state.apply_interval(&draft), Err(InvalidInterval));
        assert_eq!(state.interval().as_secs(), 10);
        assert_eq!(state.time_remaining().as_secs(), 9);
    }
}
