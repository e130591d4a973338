pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    config_missing, config_written, fatal, format_outcome, import_banner, print_outcome,
    stats_banner,
};
pub use progress::ImportProgress;
pub use table::{stats_table, TableBuilder};
pub use theme::Theme;
