mod fair_value;
mod history;

pub use {
    fair_value::{CurvePoint, FairValueResult, Zone},
    history::{ScoreWindow, StrengthHistory, WINDOW_LEN},
};
