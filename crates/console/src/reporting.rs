//! Reporting & analytics panel. All figures are a fixed demo dataset; no
//! live aggregation happens here.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: u64,
}

/// One month of the license usage series.
#[derive(Debug, Clone, Serialize)]
pub struct UsagePoint {
    pub month: &'static str,
    pub licenses: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub organization: &'static str,
    pub action: &'static str,
    pub date: &'static str,
}

/// The full reporting dataset as one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ReportingSnapshot {
    pub metrics: Vec<Metric>,
    pub usage: Vec<UsagePoint>,
    pub activities: Vec<Activity>,
}

impl ReportingSnapshot {
    pub fn demo() -> Self {
        Self {
            metrics: vec![
                Metric {
                    label: "Active Subscriptions",
                    value: 42,
                },
                Metric {
                    label: "Total Users",
                    value: 1238,
                },
                Metric {
                    label: "Licenses Used",
                    value: 317,
                },
            ],
            usage: vec![
                UsagePoint { month: "Jan", licenses: 120 },
                UsagePoint { month: "Feb", licenses: 160 },
                UsagePoint { month: "Mar", licenses: 210 },
                UsagePoint { month: "Apr", licenses: 280 },
                UsagePoint { month: "May", licenses: 300 },
                UsagePoint { month: "Jun", licenses: 260 },
                UsagePoint { month: "Jul", licenses: 320 },
                UsagePoint { month: "Aug", licenses: 380 },
                UsagePoint { month: "Sep", licenses: 450 },
            ],
            activities: vec![
                Activity {
                    organization: "Acme Inc.",
                    action: "Upgraded to Pro plan",
                    date: "2025-09-18",
                },
                Activity {
                    organization: "Globex Corp.",
                    action: "Added 12 new users",
                    date: "2025-09-17",
                },
                Activity {
                    organization: "Initech",
                    action: "Downgraded to Starter",
                    date: "2025-09-15",
                },
            ],
        }
    }

    /// Peak month of the usage series.
    pub fn peak_usage(&self) -> Option<&UsagePoint> {
        self.usage.iter().max_by_key(|p| p.licenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_snapshot_shape() {
        let snapshot = ReportingSnapshot::demo();
        assert_eq!(snapshot.metrics.len(), 3);
        assert_eq!(snapshot.usage.len(), 9);
        assert_eq!(snapshot.activities.len(), 3);
        assert_eq!(snapshot.metrics[1].value, 1238);
    }

    #[test]
    fn test_peak_usage() {
        let snapshot = ReportingSnapshot::demo();
        let peak = snapshot.peak_usage().unwrap();
        assert_eq!(peak.month, "Sep");
        assert_eq!(peak.licenses, 450);
    }
}
