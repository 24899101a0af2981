//! Canonical org hierarchy fixture.
//!
//! One admin, one team leader, one manager with a direct report, and an
//! unattached contributor — the smallest graph that exercises all four
//! visibility levels. Tests map these ids into their own user records.

use cierre_domain::level::UserLevel;
use uuid::Uuid;

/// Stable ids for a four-level org graph.
pub struct OrgFixture {
    pub admin_id: Uuid,
    pub leader_id: Uuid,
    pub manager_id: Uuid,
    pub report_id: Uuid,
    pub loner_id: Uuid,
    pub sales_team_id: Uuid,
    pub support_team_id: Uuid,
}

impl OrgFixture {
    pub fn new() -> Self {
        Self {
            admin_id: Uuid::now_v7(),
            leader_id: Uuid::now_v7(),
            manager_id: Uuid::now_v7(),
            report_id: Uuid::now_v7(),
            loner_id: Uuid::now_v7(),
            sales_team_id: Uuid::now_v7(),
            support_team_id: Uuid::now_v7(),
        }
    }

    /// (id, level, manager, team) rows for every user in the fixture.
    ///
    /// The leader and the manager's report share the sales team; the
    /// contributor belongs to no team and reports to nobody.
    pub fn rows(&self) -> Vec<(Uuid, UserLevel, Option<Uuid>, Option<Uuid>)> {
        vec![
            (self.admin_id, UserLevel::Admin, None, None),
            (
                self.leader_id,
                UserLevel::TeamLeader,
                None,
                Some(self.sales_team_id),
            ),
            (
                self.manager_id,
                UserLevel::Manager,
                None,
                Some(self.support_team_id),
            ),
            (
                self.report_id,
                UserLevel::Contributor,
                Some(self.manager_id),
                Some(self.sales_team_id),
            ),
            (self.loner_id, UserLevel::Contributor, None, None),
        ]
    }
}

impl Default for OrgFixture {
    fn default() -> Self {
        Self::new()
    }
}
