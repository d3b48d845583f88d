//! Period resolution and the allocation math behind the staffing board.

pub mod allocation;
pub mod board;
pub mod calendar;
pub mod period;
pub mod utilization;

pub use allocation::{exact_allocation, DailyAllocationMap, OVERALLOCATION_TOLERANCE};
pub use board::{display_rows, row_assignments, AssignmentKind, DisplayRow, RowGrouping, RowTotals};
pub use calendar::{date_of, day_end, day_start, days_in_month, DateSpan};
pub use period::{resolve_period, Period, ViewCursor, ViewMode, WeekStart};
pub use utilization::{
    classification_rules, classify, compute_utilization, drill_down, BreakdownItem,
    CategoryBreakdown, ClassificationRule, ProjectGroup, UtilizationCategory, UtilizationSnapshot,
};
