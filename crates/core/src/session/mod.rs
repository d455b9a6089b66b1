//! Playback controller.
//!
//! A [`Session`] owns the selected algorithm, its input, the lazily built
//! [`Trace`] and a cursor into it. Every operation pushes its visible effect
//! through a [`Presenter`] passed in by the caller; nothing is read back.
//!
//! Auto-advance is cooperative. `play` applies one step and arms a single
//! timer in the session's [`Scheduler`]; the host drives time with
//! [`Session::tick`] (or delivers a token with [`Session::on_timer`]) and
//! each fired advance arms the next one. Pausing, resetting and changing the
//! algorithm or input all cancel the pending timer before returning, and a
//! fired advance re-checks the playing flag before touching anything.

use std::time::Duration;

use crate::{
    algorithm::Algorithm,
    config::AppConfig,
    graph::Graph,
    input::{self, Dataset, RandomArrays},
    render::Presenter,
    step::Trace,
    timeline::{PlaybackClock, Scheduler, TimerToken},
    Result,
};

pub const STATUS_READY: &str = "Ready to start";
pub const STATUS_NO_SELECTION: &str = "Please select an algorithm first";
pub const STATUS_PLAYING: &str = "Animation playing";
pub const STATUS_PAUSED: &str = "Animation paused";
pub const STATUS_COMPLETED: &str = "Animation completed";
pub const STATUS_ALREADY_COMPLETED: &str = "Animation completed. Click Reset to start over.";
pub const STATUS_INVALID_INPUT: &str =
    "Invalid input format. Please use comma-separated numbers.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No trace has been built yet.
    Idle,
    /// Trace built, nothing applied.
    Ready,
    /// Auto-advance is armed.
    Running,
    Paused,
    /// Every step has been applied.
    Completed,
}

/// What a playback operation did, for callers that need more than the
/// status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No algorithm selected; nothing changed.
    NoSelection,
    /// Auto-advance started and the step at `index` was applied.
    Started { index: usize },
    AlreadyPlaying,
    /// The step at `index` was applied.
    Applied { index: usize },
    /// Cursor moved back to `cursor` and the view was rebuilt.
    Rewound { cursor: usize },
    Paused,
    /// The trace is exhausted.
    Completed,
    /// Nothing to do (rewind at the start, stale or cancelled timer).
    Ignored,
}

#[derive(Debug)]
pub struct Session {
    config: AppConfig,
    algorithm: Option<Algorithm>,
    values: Vec<i64>,
    array_size: usize,
    target: i64,
    graph: Graph,
    trace: Option<Trace>,
    cursor: usize,
    playing: bool,
    speed: f32,
    clock: PlaybackClock,
    scheduler: Scheduler,
    random: RandomArrays,
}

impl Session {
    /// Creates a session over a random array of the configured size.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let mut random = RandomArrays::from_config(&config.input);
        let array_size = config.input.clamp_size(config.input.array_size);
        let values = random.generate(array_size);
        Ok(Self::build(config, values, random))
    }

    /// Creates a session over explicit array values.
    pub fn with_values(config: AppConfig, values: Vec<i64>) -> Result<Self> {
        config.validate()?;
        let random = RandomArrays::from_config(&config.input);
        Ok(Self::build(config, values, random))
    }

    fn build(config: AppConfig, values: Vec<i64>, random: RandomArrays) -> Self {
        Self {
            target: config.input.search_target,
            speed: config
                .playback
                .speed
                .clamp(config.playback.min_speed, config.playback.max_speed),
            array_size: values.len(),
            values,
            algorithm: None,
            graph: Graph::demo(),
            trace: None,
            cursor: 0,
            playing: false,
            clock: PlaybackClock::default(),
            scheduler: Scheduler::new(),
            random,
            config,
        }
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Delay the next armed advance will use.
    pub fn delay(&self) -> Duration {
        self.config.playback.delay_for(self.speed)
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn pending_advance(&self) -> Option<TimerToken> {
        self.scheduler.pending().map(|advance| advance.token)
    }

    /// How long a sleeping host may wait before calling [`Session::tick`].
    pub fn time_until_next_advance(&self) -> Option<Duration> {
        self.scheduler.time_until_due(self.clock.now())
    }

    pub fn state(&self) -> PlaybackState {
        match &self.trace {
            None => PlaybackState::Idle,
            Some(_) if self.playing => PlaybackState::Running,
            Some(trace) if self.cursor >= trace.len() => PlaybackState::Completed,
            Some(_) if self.cursor == 0 => PlaybackState::Ready,
            Some(_) => PlaybackState::Paused,
        }
    }

    /// Input the selected algorithm runs over.
    pub fn dataset(&self) -> Dataset<'_> {
        match self.algorithm {
            Some(algorithm) if !algorithm.uses_array() => Dataset::Graph(&self.graph),
            _ => Dataset::Array(&self.values),
        }
    }

    /// Switches algorithm. The previous trace is dropped outright and any
    /// pending advance is cancelled.
    pub fn select_algorithm<P: Presenter + ?Sized>(
        &mut self,
        algorithm: Algorithm,
        presenter: &mut P,
    ) {
        tracing::info!(algorithm = algorithm.slug(), "selected algorithm");
        self.algorithm = Some(algorithm);
        self.reset(presenter);
    }

    /// Builds the trace for the current (algorithm, input) pair if absent.
    ///
    /// Binary search sorts its input first; the sorted array then replaces
    /// the session input and is re-rendered.
    pub fn ensure_trace<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Option<&Trace> {
        let algorithm = self.algorithm?;

        if self.trace.is_none() {
            let generated = algorithm.generate(&self.values, self.target, &self.graph);
            if let Some(sorted) = generated.replaced_input {
                tracing::info!(
                    algorithm = algorithm.slug(),
                    "input sorted ascending before tracing"
                );
                self.values = sorted;
                presenter.render_initial(Dataset::Array(&self.values));
            }

            tracing::debug!(
                algorithm = algorithm.slug(),
                steps = generated.trace.len(),
                "generated trace"
            );
            presenter.report_progress(self.cursor, generated.trace.len());
            self.trace = Some(generated.trace);
        }

        self.trace.as_ref()
    }

    pub fn play<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Outcome {
        if self.algorithm.is_none() {
            presenter.report_status(STATUS_NO_SELECTION);
            return Outcome::NoSelection;
        }
        if self.playing {
            return Outcome::AlreadyPlaying;
        }

        let total = self.ensure_trace(presenter).map_or(0, Trace::len);
        if self.cursor >= total {
            presenter.report_status(STATUS_ALREADY_COMPLETED);
            return Outcome::Completed;
        }

        self.playing = true;
        presenter.report_status(STATUS_PLAYING);
        tracing::debug!(cursor = self.cursor, total, "playback started");

        match self.apply_next(presenter) {
            Some(index) => {
                self.arm_next();
                Outcome::Started { index }
            }
            None => {
                self.playing = false;
                Outcome::Ignored
            }
        }
    }

    pub fn pause<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Outcome {
        self.halt();
        if self.cursor < self.trace_len() {
            presenter.report_status(STATUS_PAUSED);
        }
        Outcome::Paused
    }

    /// Applies the step under the cursor. Leaves the playing flag alone.
    pub fn step_forward<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Outcome {
        if self.algorithm.is_none() {
            presenter.report_status(STATUS_NO_SELECTION);
            return Outcome::NoSelection;
        }

        let total = self.ensure_trace(presenter).map_or(0, Trace::len);
        if self.cursor >= total {
            presenter.report_status(STATUS_COMPLETED);
            return Outcome::Completed;
        }

        match self.apply_next(presenter) {
            Some(index) => {
                if self.cursor >= total {
                    presenter.report_status(STATUS_COMPLETED);
                }
                Outcome::Applied { index }
            }
            None => Outcome::Ignored,
        }
    }

    /// Moves the cursor back one step and rebuilds the view by silently
    /// replaying the trace from the start. Only the last replayed step's
    /// message is published.
    pub fn step_backward<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Outcome {
        if self.cursor == 0 {
            return Outcome::Ignored;
        }
        let Some(trace) = &self.trace else {
            return Outcome::Ignored;
        };

        self.cursor -= 1;
        let replayed = &trace.steps()[..self.cursor];

        presenter.reset_visual_state();
        if replayed.is_empty() {
            presenter.render_initial(self.dataset());
        }
        for step in replayed {
            presenter.apply_step(step, true);
        }

        let status = replayed
            .last()
            .map_or(STATUS_READY, |step| step.message.as_str());
        presenter.report_status(status);
        presenter.report_progress(self.cursor, trace.len());

        tracing::debug!(cursor = self.cursor, "rewound one step");
        Outcome::Rewound {
            cursor: self.cursor,
        }
    }

    /// Stops playback, drops the trace and redraws the un-stepped input.
    pub fn reset<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        self.halt();
        self.clock.reset();
        self.cursor = 0;
        self.trace = None;

        presenter.report_progress(0, 0);
        presenter.report_status(STATUS_READY);
        if self.algorithm.is_some() {
            presenter.render_initial(self.dataset());
        }
    }

    /// Sets the speed multiplier, clamped into the configured range. The
    /// pending advance keeps its deadline; the new delay applies to the next.
    pub fn set_speed(&mut self, speed: f32) -> Result<f32> {
        self.speed = self.config.playback.clamp_speed(speed)?;
        tracing::debug!(
            speed = self.speed,
            delay_ms = self.delay().as_millis() as u64,
            "speed changed"
        );
        Ok(self.speed)
    }

    /// Advances playback time and fires the pending advance if it is due.
    pub fn tick<P: Presenter + ?Sized>(
        &mut self,
        elapsed: Duration,
        presenter: &mut P,
    ) -> Option<Outcome> {
        self.clock.advance(elapsed);
        let token = self.scheduler.take_due(self.clock.now())?;
        tracing::trace!(?token, "advance due");
        Some(self.fire(presenter))
    }

    /// Entry point for hosts that run their own timers. Tokens that are no
    /// longer pending are ignored.
    pub fn on_timer<P: Presenter + ?Sized>(
        &mut self,
        token: TimerToken,
        presenter: &mut P,
    ) -> Outcome {
        if !self.scheduler.claim(token) {
            tracing::debug!(?token, "ignoring stale timer");
            return Outcome::Ignored;
        }
        self.fire(presenter)
    }

    pub fn set_values<P: Presenter + ?Sized>(&mut self, values: Vec<i64>, presenter: &mut P) {
        self.array_size = values.len();
        self.values = values;
        self.input_changed(presenter);
    }

    /// Parses comma separated numbers into the new input. On failure the
    /// previous input is kept and the user is told why.
    pub fn apply_custom_input<P: Presenter + ?Sized>(
        &mut self,
        text: &str,
        presenter: &mut P,
    ) -> Result<()> {
        match input::parse_custom_input(text) {
            Ok(values) => {
                self.set_values(values, presenter);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "rejected custom input");
                presenter.report_status(STATUS_INVALID_INPUT);
                Err(err)
            }
        }
    }

    /// Replaces the input with fresh random values of the current size.
    pub fn randomize<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        let size = self.config.input.clamp_size(self.array_size);
        let values = self.random.generate(size);
        self.set_values(values, presenter);
    }

    /// Changes the array size (clamped) and regenerates a random input.
    pub fn set_array_size<P: Presenter + ?Sized>(
        &mut self,
        size: usize,
        presenter: &mut P,
    ) -> usize {
        self.array_size = self.config.input.clamp_size(size);
        self.randomize(presenter);
        self.array_size
    }

    pub fn set_target<P: Presenter + ?Sized>(&mut self, target: i64, presenter: &mut P) {
        self.target = target;
        self.input_changed(presenter);
    }

    fn input_changed<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        tracing::debug!(len = self.values.len(), target = self.target, "input changed");
        self.reset(presenter);
    }

    fn fire<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Outcome {
        if !self.playing {
            return Outcome::Ignored;
        }

        if self.cursor >= self.trace_len() {
            self.playing = false;
            presenter.report_status(STATUS_COMPLETED);
            tracing::debug!("playback completed");
            return Outcome::Completed;
        }

        match self.apply_next(presenter) {
            Some(index) => {
                self.arm_next();
                Outcome::Applied { index }
            }
            None => Outcome::Ignored,
        }
    }

    fn apply_next<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Option<usize> {
        let trace = self.trace.as_ref()?;
        let index = self.cursor;
        let step = trace.get(index)?;

        presenter.apply_step(step, false);
        self.cursor += 1;
        presenter.report_progress(self.cursor, trace.len());
        Some(index)
    }

    fn arm_next(&mut self) {
        let token = self.scheduler.arm(self.clock.now(), self.delay());
        tracing::trace!(
            ?token,
            delay_ms = self.delay().as_millis() as u64,
            "armed advance"
        );
    }

    fn halt(&mut self) {
        self.playing = false;
        self.scheduler.cancel();
    }

    fn trace_len(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::len)
    }
}
