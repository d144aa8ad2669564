//! Suggested KEDB entries and the built-in fallback set.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A suggested Known-Error Database entry.
///
/// Immutable once received from the collaborator; the list order returned
/// by the API is the display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuggestedEntry {
    /// ServiceNow-style knowledge base identifier, e.g. `KB0092892`
    pub id: String,
    /// Short title describing the known error
    pub title: String,
    /// Whether this entry is the best match for the incident
    pub recommended: bool,
    /// Full resolution text, lightly marked up with `**bold**` emphasis
    pub content: String,
}

/// Returns the fixed built-in entry set.
///
/// Used in two places: as the canned payload served by the mock API, and
/// as the client-side fallback when the suggestions call fails. Always
/// three entries, first one recommended.
pub fn fallback_entries() -> Vec<SuggestedEntry> {
    vec![
        SuggestedEntry {
            id: "KB0092892".to_owned(),
            title: "Generic_KEDB_CRCD_MAXRUN App_ID: CRCD Issue: MAXRUNALARM/JOBFAILURE/JOBTERMINATED: CRCD_%_B Symptom/Intake: Netcool Incident Alert / Notification on MAXRUNALARM/JOBFAILURE/JOBTERMINATED in".to_owned(),
            recommended: true,
            content: "**KEDB View**

**How to solve the failure:**

1. Login & navigation information: Login to Autosys Workload Automation (crvrt6000b.wwt1farm.com) through UID and file password.

2. On the left side, click Views, select CRCD-PROD, and expand

3. Please check the job status on right side of windows in Autosys by giving below details:

Select Jobs and Alerts
Give Name of the failed job
Click Go. You will get latest job status as you can see below:
4. Check if the job is still running. The Maxrun alarm is raised for CRCD because of the Latency issue.

5. Please monitor the job for 2-3 hours after the alert was received. (This is expected behavior due to nature of the job because of data center latency)."
                .to_owned(),
        },
        SuggestedEntry {
            id: "KB0082635".to_owned(),
            title: "C2T - Cleanup DQE job C2TZ2_156**%_DQE*%_CL_C failure due to recovery file lock issue or run time issue".to_owned(),
            recommended: false,
            content: "**KEDB View**

**How to solve the failure:**

1. Check the DQE job status in the system
2. Verify if there are any file lock issues
3. Review the job logs for specific error messages
4. Restart the cleanup process if necessary
5. Monitor the job completion"
                .to_owned(),
        },
        SuggestedEntry {
            id: "KB0090234".to_owned(),
            title: "Generic_CEODS_BOX_JOB_MAXRUNALARM App_ID: CEODS Issue:".to_owned(),
            recommended: false,
            content: "**KEDB View**

**How to solve the failure:**

1. Navigate to CEODS job monitoring interface
2. Check the MAXRUNALARM status
3. Review job dependencies and prerequisites
4. Verify system resources availability
5. Execute job restart procedure if needed"
                .to_owned(),
        },
    ]
}
