mod catalog_vm;
mod palette_vm;
mod quiz_vm;
mod time_fmt;

pub use catalog_vm::{
    ALL_CATEGORIES, AttemptRowVm, ContestBannerVm, LeaderboardRowVm, QuizCardVm, StatsVm,
    category_options, contest_banner, format_thousands, leaderboard_rows, parse_join_id,
    quiz_cards, stats_vm,
};
pub use palette_vm::{LegendEntryVm, PaletteButtonVm, legend, palette_buttons, status_class};
pub use quiz_vm::{OptionVm, QuizEffect, QuizIntent, QuizVm};
pub use time_fmt::{format_countdown, format_date};
