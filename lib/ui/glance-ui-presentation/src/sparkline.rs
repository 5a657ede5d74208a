const TICKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block glyph per point, scaled between the smallest and largest value.
pub fn sparkline(points: &[f64]) -> String {
    let Some(min) = points.iter().copied().reduce(f64::min) else {
        return String::new();
    };
    let max = points.iter().copied().fold(min, f64::max);
    let range = max - min;
    let top = (TICKS.len() - 1) as f64;

    points
        .iter()
        .map(|point| {
            if range <= 0.0 {
                return TICKS[0];
            }
            let index = ((point - min) / range * top).round() as usize;
            TICKS[index.min(TICKS.len() - 1)]
        })
        .collect()
}
