//! Core library for the Algorithm Visualiser.
//!
//! The crate turns a run of one of a fixed set of classic algorithms into a
//! [`Trace`] of inspectable steps and drives playback over it. Generators are
//! pure functions; the [`Session`] owns the mutable playback state and talks
//! to the outside world only through the [`Presenter`] trait, so everything
//! here runs headless.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod graph;
pub mod input;
pub mod record;
pub mod render;
pub mod searching;
pub mod session;
pub mod sorting;
pub mod step;
pub mod timeline;

pub use algorithm::{Algorithm, AlgorithmInfo, Category, Generated, TimeComplexity};
pub use config::{AppConfig, InputConfig, PlaybackConfig};
pub use error::{Result, VisualiserError};
pub use graph::{Graph, GraphEdge, GraphNode};
pub use input::{parse_custom_input, Dataset, RandomArrays};
pub use record::{PresenterEvent, RecordedInput, Recorder, TraceExport};
pub use render::{Bar, BarMarker, NodeView, Presenter, RenderModel, Scene};
pub use session::{Outcome, PlaybackState, Session};
pub use step::{NodeId, Step, StepKind, Subjects, Trace};
pub use timeline::{PlaybackClock, ScheduledAdvance, Scheduler, TimerToken};
