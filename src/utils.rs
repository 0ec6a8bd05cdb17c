use crate::constants::{SIZE_UNITS, SIZE_UNIT_BASE};

/// Formats a byte count with 1024-based units and up to two decimals.
///
/// Trailing zeros are dropped, so 1536 is "1.5 KB" and 3 MiB is "3 MB".
/// Values past the last unit stay in MB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return format!("0 {}", SIZE_UNITS[0]);
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;
    while size >= SIZE_UNIT_BASE && unit_index < SIZE_UNITS.len() - 1 {
        size /= SIZE_UNIT_BASE;
        unit_index += 1;
    }

    let fixed = format!("{:.2}", size);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit_index])
}

/// Batch savings as a percentage rounded to one decimal.
///
/// `None` when there is nothing to compare against.
pub fn savings_percentage(total_original: u64, total_final: u64) -> Option<f64> {
    if total_original == 0 {
        return None;
    }
    let ratio = (total_original as f64 - total_final as f64) / total_original as f64 * 100.0;
    Some((ratio * 10.0).round() / 10.0)
}

pub fn format_savings(savings: Option<f64>) -> String {
    match savings {
        Some(percent) => format!("{:.1}%", percent),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1100), "1.07 KB");
        assert_eq!(format_file_size(3_145_728), "3 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5120 MB");
    }

    #[test]
    fn test_savings_percentage() {
        assert_eq!(savings_percentage(3000, 2300), Some(23.3));
        assert_eq!(savings_percentage(1000, 1000), Some(0.0));
        assert_eq!(savings_percentage(0, 0), None);
    }

    #[test]
    fn test_format_savings() {
        assert_eq!(format_savings(Some(23.3)), "23.3%");
        assert_eq!(format_savings(None), "N/A");
    }
}
