pub mod formatter;

pub use formatter::{
    format_age, format_breakdown, format_ranked_table, format_report, format_tsv,
    should_use_colors,
};
