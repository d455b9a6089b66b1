use std::io::{self, Write};

use algorithm_visualiser_core::{Dataset, Presenter, Recorder, RenderModel, Step};

/// Presenter that draws the headless model to stdout.
///
/// Notifications only mark the frame dirty; [`TerminalPresenter::flush`]
/// prints it once per host iteration so a silent replay of hundreds of steps
/// still produces a single frame.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    model: RenderModel,
    recorder: Option<Recorder>,
    dirty: bool,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also keeps a log of every presenter call.
    pub fn with_recorder(mut self) -> Self {
        self.recorder = Some(Recorder::new());
        self
    }

    pub fn recorder(&self) -> Option<&Recorder> {
        self.recorder.as_ref()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.dirty = false;

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", self.model.render_text())?;
        stdout.flush()
    }

    fn touch(&mut self) -> Option<&mut Recorder> {
        self.dirty = true;
        self.recorder.as_mut()
    }
}

impl Presenter for TerminalPresenter {
    fn render_initial(&mut self, input: Dataset<'_>) {
        self.model.render_initial(input);
        if let Some(recorder) = self.touch() {
            recorder.render_initial(input);
        }
    }

    fn apply_step(&mut self, step: &Step, silent: bool) {
        self.model.apply_step(step, silent);
        if let Some(recorder) = self.touch() {
            recorder.apply_step(step, silent);
        }
    }

    fn reset_visual_state(&mut self) {
        self.model.reset_visual_state();
        if let Some(recorder) = self.touch() {
            recorder.reset_visual_state();
        }
    }

    fn report_status(&mut self, text: &str) {
        self.model.report_status(text);
        if let Some(recorder) = self.touch() {
            recorder.report_status(text);
        }
    }

    fn report_progress(&mut self, cursor: usize, total: usize) {
        self.model.report_progress(cursor, total);
        if let Some(recorder) = self.touch() {
            recorder.report_progress(cursor, total);
        }
    }
}
