pub mod classifier;
pub mod fueling;
pub mod record;

pub use classifier::{classify_day, has_high_intensity, total_hours, DayType};
pub use fueling::{fueling_plan, FuelingPlan, Intensity, Physiology, WorkoutParams};
pub use record::WorkoutRecord;
