//! Read-only aggregation over the session history.

use std::collections::BTreeMap;

use pomolive_shared::time::timestamp_to_date;
use serde::Serialize;

use super::{Session, Timestamp};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Lookback windows, in days, reported by the stats endpoint.
pub const EFFICIENCY_WINDOWS: [i64; 7] = [7, 14, 30, 60, 90, 120, 180];

/// Goal attainment over a lookback window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EfficiencyStats {
    pub average_sessions: f64,
    pub hours: f64,
    /// Percentage of the daily goal reached on average.
    pub efficiency: f64,
    pub missing_sessions: u64,
    pub days_selected: i64,
}

/// Number of sessions started on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStat {
    pub date: String,
    pub sessions: usize,
}

/// Efficiency of countdown work sessions started in the `days` before `now`.
///
/// Breaks and flow sessions are not counted.
pub fn calculate_efficiency(
    days: i64,
    sessions: &[Session],
    daily_goal: u32,
    now: Timestamp,
) -> EfficiencyStats {
    if days <= 0 {
        return EfficiencyStats::default();
    }

    let window_start = now.saturating_sub(days.saturating_mul(MILLIS_PER_DAY));
    let (count, seconds) = sessions
        .iter()
        .filter(|s| !s.is_break && !s.flow_mode)
        .filter(|s| s.started_at > window_start && s.started_at <= now)
        .fold((0u64, 0u64), |(count, seconds), s| {
            let worked = if s.elapsed_ticks > 0 {
                s.elapsed_ticks
            } else {
                s.planned_duration.as_secs()
            };
            (count + 1, seconds + worked)
        });

    let goal = f64::from(daily_goal);
    let average = count as f64 / days as f64;
    let efficiency = if daily_goal > 0 {
        average / goal * 100.0
    } else {
        0.0
    };
    let missing = if average < goal {
        (u64::from(daily_goal) * days as u64).saturating_sub(count)
    } else {
        0
    };

    EfficiencyStats {
        average_sessions: average,
        hours: seconds as f64 / 3600.0,
        efficiency,
        missing_sessions: missing,
        days_selected: days,
    }
}

/// Session counts per day, oldest first.
pub fn calculate_daily_stats(sessions: &[Session]) -> Vec<DailyStat> {
    let mut days: BTreeMap<String, usize> = BTreeMap::new();
    for session in sessions {
        *days.entry(timestamp_to_date(session.started_at)).or_default() += 1;
    }

    days.into_iter()
        .map(|(date, sessions)| DailyStat { date, sessions })
        .collect()
}

/// Everything the stats endpoint reports.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub daily_goal: u32,
    pub efficiency: Vec<EfficiencyStats>,
    pub daily: Vec<DailyStat>,
}

impl StatsReport {
    pub fn build(sessions: &[Session], daily_goal: u32, now: Timestamp) -> Self {
        Self {
            daily_goal,
            efficiency: EFFICIENCY_WINDOWS
                .iter()
                .map(|days| calculate_efficiency(*days, sessions, daily_goal, now))
                .collect(),
            daily: calculate_daily_stats(sessions),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::Activity;

    // 2023-01-10 00:00:00 UTC
    const NOW: Timestamp = 1_673_308_800_000;

    fn work(started_at: Timestamp, elapsed_ticks: u64) -> Session {
        let mut session = Session::work(
            started_at,
            Duration::from_secs(25 * 60),
            Activity::new(1, "General"),
            false,
        );
        session.elapsed_ticks = elapsed_ticks;
        session
    }

    #[test]
    fn test_efficiency_with_non_positive_days() {
        // テスト項目: 日数が 0 以下の場合はすべて 0 の統計が返される
        let result = calculate_efficiency(0, &[work(NOW - 1000, 1500)], 8, NOW);
        assert_eq!(result, EfficiencyStats::default());
    }

    #[test]
    fn test_efficiency_counts_sessions_inside_window() {
        // テスト項目: 期間内の作業セッションだけが集計される
        // given (前提条件):
        let sessions = vec![
            work(NOW - MILLIS_PER_DAY, 1500),
            work(NOW - 2 * MILLIS_PER_DAY, 0),
            work(NOW - 30 * MILLIS_PER_DAY, 1500),
        ];

        // when (操作):
        let result = calculate_efficiency(7, &sessions, 2, NOW);

        // then (期待する結果):
        assert_eq!(result.days_selected, 7);
        assert!((result.average_sessions - 2.0 / 7.0).abs() < 1e-9);
        // zero ticks fall back to the planned duration
        assert!((result.hours - 3000.0 / 3600.0).abs() < 1e-9);
        assert!((result.efficiency - (2.0 / 7.0) / 2.0 * 100.0).abs() < 1e-9);
        assert_eq!(result.missing_sessions, 12);
    }

    #[test]
    fn test_efficiency_skips_breaks_and_flow_sessions() {
        // テスト項目: 休憩とフローモードのセッションは集計されない
        // given (前提条件):
        let mut flow = work(NOW - 1000, 600);
        flow.flow_mode = true;
        let rest = Session::rest(NOW - 1000, Duration::from_secs(300));

        // when (操作):
        let result = calculate_efficiency(1, &[flow, rest], 8, NOW);

        // then (期待する結果):
        assert_eq!(result.average_sessions, 0.0);
        assert_eq!(result.missing_sessions, 8);
    }

    #[test]
    fn test_efficiency_goal_met_has_no_missing_sessions() {
        // テスト項目: 目標を達成している場合は不足数が 0 になる
        let sessions: Vec<Session> = (0..3).map(|i| work(NOW - 1000 - i, 1500)).collect();
        let result = calculate_efficiency(1, &sessions, 2, NOW);
        assert_eq!(result.missing_sessions, 0);
        assert!((result.efficiency - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_stats_sorted_by_date() {
        // テスト項目: 日別の集計が日付順に並ぶ
        // given (前提条件):
        let sessions = vec![
            work(NOW + 1000, 1500),
            work(NOW - MILLIS_PER_DAY, 1500),
            work(NOW + 2000, 1500),
        ];

        // when (操作):
        let result = calculate_daily_stats(&sessions);

        // then (期待する結果):
        assert_eq!(
            result,
            vec![
                DailyStat {
                    date: "2023-01-09".to_string(),
                    sessions: 1
                },
                DailyStat {
                    date: "2023-01-10".to_string(),
                    sessions: 2
                },
            ]
        );
    }

    #[test]
    fn test_report_covers_every_window() {
        // テスト項目: レポートに全ての集計期間が期間順に含まれる
        // given (前提条件):
        let sessions = vec![work(NOW - 1000, 1500)];

        // when (操作):
        let report = StatsReport::build(&sessions, 8, NOW);

        // then (期待する結果):
        let windows: Vec<i64> = report.efficiency.iter().map(|e| e.days_selected).collect();
        assert_eq!(windows, EFFICIENCY_WINDOWS.to_vec());
        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.daily_goal, 8);
    }
}
