use crate::Color as PlayerColor;
use crate::{min_and_max, GameLog, REMAINING_TIME_CEILING};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::Path;

const DASH_SIZE: i32 = 10;
const DASH_SPACING: i32 = 6;
const LEGEND_WIDTH: i32 = 30;

/// Image size and the remaining time ceiling of the left axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    pub size: (u32, u32),
    pub ceiling: i64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            size: (1280, 720),
            ceiling: REMAINING_TIME_CEILING,
        }
    }
}

/// solid for the highlighted color, or for both colors without a highlight
pub fn line_solid(highlight: Option<PlayerColor>, color: PlayerColor) -> bool {
    highlight.map_or(true, |h| h == color)
}

/// x axis span; games with at most one move per side get a fixed span
pub fn x_range(black: usize, white: usize) -> (f64, f64) {
    let longest = black.max(white);
    if longest > 1 {
        (0., (longest + 1) as f64)
    } else {
        (-1., 1.)
    }
}

/// top of the time per move axis, 10% above the largest value
pub fn per_move_axis_max(log: &GameLog) -> f64 {
    let per_move: Vec<i64> = log
        .black_moves
        .iter()
        .chain(log.white_moves.iter())
        .map(|m| m.time_per_move)
        .collect();
    match min_and_max(&per_move[..]) {
        Some((_, max)) if max > 0 => max as f64 * 1.1,
        _ => 1.,
    }
}

/// turn label, ticks between two turns stay blank
pub fn format_turn(x: f64) -> String {
    if x.fract() == 0. {
        format!("{:.0}", x)
    } else {
        String::new()
    }
}

/// formats milliseconds as a m:ss clock
pub fn format_clock(ms: f64) -> String {
    let d = chrono::Duration::milliseconds(ms.round() as i64);
    let minutes = d.num_minutes();
    let seconds = (d - chrono::Duration::minutes(minutes)).num_seconds();
    format!("{}:{:02}", minutes, seconds.abs())
}

impl GameLog {
    /// plots remaining time (left axis) and time per move (right axis)
    /// of both colors to png
    pub fn plot_timing(
        &self,
        fout: &Path,
        title: &str,
        highlight: Option<PlayerColor>,
        style: &ChartStyle,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (xmin, xmax) = x_range(self.black_moves.len(), self.white_moves.len());
        let ceiling = style.ceiling as f64;
        let per_move_max = per_move_axis_max(self);

        let root = BitMapBackend::new(fout, style.size).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28).into_font())
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .right_y_label_area_size(100)
            .build_cartesian_2d(xmin..xmax, 0f64..ceiling)?
            .set_secondary_coord(xmin..xmax, 0f64..per_move_max);
        chart
            .configure_mesh()
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(1))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 20))
            .y_label_style(("sans-serif", 20).into_font().color(&BLUE))
            .x_desc("turn")
            .y_desc("remaining time [m:ss]")
            .x_label_formatter(&|x: &f64| format_turn(*x))
            .y_label_formatter(&|y: &f64| format_clock(*y))
            .draw()?;
        chart
            .configure_secondary_axes()
            .label_style(("sans-serif", 20).into_font().color(&RED))
            .y_desc("time per move [ms]")
            .y_label_formatter(&|y: &f64| format!("{:.0}", y))
            .draw()?;

        let remaining_style = BLUE.stroke_width(2);
        let per_move_style = RED.stroke_width(2);
        for color in [PlayerColor::Black, PlayerColor::White] {
            let moves = self.moves(color);
            let solid = line_solid(highlight, color);

            let remaining: Vec<(f64, f64)> = moves
                .iter()
                .enumerate()
                .map(|(i, m)| (i as f64, m.remaining_time.clamp(0, style.ceiling) as f64))
                .collect();
            let label = match self.player(color) {
                Some(p) => p.label(),
                None => color.to_string(),
            };
            if solid {
                chart
                    .draw_series(LineSeries::new(remaining, remaining_style))?
                    .label(label)
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + LEGEND_WIDTH, y)], remaining_style)
                    });
            } else {
                chart
                    .draw_series(DashedLineSeries::new(
                        remaining,
                        DASH_SIZE,
                        DASH_SPACING,
                        remaining_style,
                    ))?
                    .label(label)
                    .legend(move |(x, y)| {
                        EmptyElement::at((x, y))
                            + PathElement::new(vec![(0, 0), (DASH_SIZE, 0)], remaining_style)
                            + PathElement::new(
                                vec![(LEGEND_WIDTH - DASH_SIZE, 0), (LEGEND_WIDTH, 0)],
                                remaining_style,
                            )
                    });
            }

            let per_move: Vec<(f64, f64)> = moves
                .iter()
                .enumerate()
                .map(|(i, m)| (i as f64, m.time_per_move as f64))
                .collect();
            if solid {
                chart.draw_secondary_series(LineSeries::new(per_move, per_move_style))?;
            } else {
                chart.draw_secondary_series(DashedLineSeries::new(
                    per_move,
                    DASH_SIZE,
                    DASH_SPACING,
                    per_move_style,
                ))?;
            }
        }

        // last black move
        let end_style = GREEN.stroke_width(2);
        let end_line: Vec<(f64, f64)> = match self.black_moves.len().checked_sub(1) {
            Some(x) => vec![(x as f64, 0.), (x as f64, ceiling)],
            None => Vec::new(),
        };
        chart
            .draw_series(LineSeries::new(end_line, end_style))?
            .label(self.caption())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + LEGEND_WIDTH, y)], end_style)
            });

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperMiddle)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", 18))
            .draw()?;
        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MoveRecord, Outcome};

    fn log(per_move: &[i64]) -> GameLog {
        GameLog {
            players: Vec::new(),
            black_moves: per_move
                .iter()
                .map(|&t| MoveRecord {
                    remaining_time: 0,
                    time_per_move: t,
                })
                .collect(),
            white_moves: Vec::new(),
            outcome: Outcome::Draw,
        }
    }

    #[test]
    fn test_line_solid() {
        assert!(line_solid(None, PlayerColor::Black));
        assert!(line_solid(None, PlayerColor::White));
        assert!(line_solid(Some(PlayerColor::White), PlayerColor::White));
        assert!(!line_solid(Some(PlayerColor::White), PlayerColor::Black));
    }

    #[test]
    fn test_x_range() {
        assert_eq!(x_range(40, 39), (0., 41.));
        assert_eq!(x_range(3, 0), (0., 4.));
        assert_eq!(x_range(1, 1), (-1., 1.));
        assert_eq!(x_range(0, 0), (-1., 1.));
    }

    #[test]
    fn test_per_move_axis_max() {
        assert!((per_move_axis_max(&log(&[100, 2000, 50])) - 2200.).abs() < 1e-9);
        assert_eq!(per_move_axis_max(&log(&[])), 1.);
        assert_eq!(per_move_axis_max(&log(&[0, 0])), 1.);
    }

    #[test]
    fn test_format_turn_blanks_fractional_ticks() {
        let ticks: Vec<String> = [0., 0.5, 1., 1.5, 2., 2.5, 3.]
            .iter()
            .map(|&x| format_turn(x))
            .collect();
        assert_eq!(ticks, vec!["0", "", "1", "", "2", "", "3"]);
        assert_eq!(format_turn(-1.), "-1");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.), "0:00");
        assert_eq!(format_clock(65_000.), "1:05");
        assert_eq!(format_clock(120_000.), "2:00");
        assert_eq!(format_clock(59_999.), "0:59");
    }
}
