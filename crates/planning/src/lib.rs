//! Deterministic nutrition planning engine.
//!
//! Given an athlete profile and a window of workouts, the engine classifies
//! each day's training load, computes bounded macro targets, splits them
//! across meal slots, re-times the slots around workouts, and assigns a
//! recipe to every slot under a weekly repetition cap. Everything is a pure
//! computation over in-memory inputs: no I/O, no clock reads, no
//! randomness. Two runs over the same inputs produce byte-identical output.

pub mod builder;
pub mod error;
pub mod plan;
pub mod ports;
pub mod schedule;
pub mod selector;
pub mod targets;

pub use builder::{build_plan, parse_date, PlanRequest};
pub use error::PlanningError;
pub use plan::{DayPlan, MacroTargets, MealSlot, PlanSource, SlotTag, WorkoutFueling};
pub use ports::{plan_and_store, PlanSink, ProfileSource, WorkoutSource};
pub use schedule::{build_slots, resolve_collisions, MIN_SLOT_GAP_MIN};
pub use selector::{select_recipe, UsedTitleRegistry, MAX_TITLE_USES};
pub use targets::{daily_targets, intra_cho_rate};
