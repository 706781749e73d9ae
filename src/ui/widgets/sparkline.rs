//! Inline sparkline text for compact metric trends

/// Format series values as a bar-character string, newest on the right.
pub fn sparkline_text(data: &[u64], width: usize) -> String {
    if data.is_empty() {
        return String::new();
    }

    let bar_chars = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let max = *data.iter().max().unwrap_or(&1);
    let max = max.max(1);

    let data_len = data.len().min(width);
    let data_start = data.len().saturating_sub(data_len);

    data[data_start..]
        .iter()
        .map(|&value| {
            let scaled = ((value as f64 / max as f64) * 7.0).round() as usize;
            bar_chars[scaled.min(7)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparkline_text() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8];
        let text = sparkline_text(&data, 8);
        assert_eq!(text.chars().count(), 8);
    }

    #[test]
    fn test_sparkline_text_truncates_to_width() {
        let data: Vec<u64> = (0..40).collect();
        let text = sparkline_text(&data, 10);
        assert_eq!(text.chars().count(), 10);
    }

    #[test]
    fn test_sparkline_text_empty() {
        let data: [u64; 0] = [];
        let text = sparkline_text(&data, 8);
        assert!(text.is_empty());
    }
}
