pub mod types;

pub use types::{
    AthleteProfile, CaffeineUse, Diet, GiSensitivity, GoalClass, SweatRate, MAX_WEIGHT_KG,
};
