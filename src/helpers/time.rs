use chrono::{Local, NaiveDateTime, SubsecRound};

/// Local wall-clock time, truncated to whole seconds.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}
