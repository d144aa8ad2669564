//! Draft template rendering.
//!
//! "Generation" in this system is deliberately shallow: the incident
//! description is interpolated verbatim into a fixed resolution template.
//! The mock API serves this template as its generated payload, and the
//! session falls back to the same template locally when the generation
//! call fails, so the user reaches an editable draft either way.

use kedb_types::IncidentDescription;

/// Renders the fixed KEDB draft template for an incident description.
///
/// The description is inserted verbatim, without escaping; the result is
/// lightly marked up prose destined for a free-text editor, not a parser.
pub fn draft_template(description: &IncidentDescription) -> String {
    format!(
        "**KEDB Draft**

**Error:** {description}

**Rootcause:** The job {description} terminated unexpectedly. This specific cause requires further investigation but common causes include resource contention, downstream job failures, or issues within the job script itself.

**Resolution:**

**Description:** This KEDB entry provides steps to resolve the termination of the {description} Autosys job in the PC3 environment. The steps involve checking job dependencies, examining logs, restarting the job, and escalating if necessary.

**Resolution Steps**

Step_Number: 1
Action: Check Job Dependencies
Command: job_depends | {description} -d
Verification: Review the output for any failed dependencies.
Expected_Result: Output showing the dependencies of the job. If any dependent job failed, address that failure first.

Step_Number: 2
Action: Examine Autosys Logs
Command: Review job logs for errors
Verification: Check system logs and application logs for error messages
Expected_Result: Identify specific error that caused job termination"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_interpolates_description_verbatim() {
        let desc = IncidentDescription::new("FOO_JOB.B - JOBTERMINATED")
            .expect("Failed to create description");
        let draft = draft_template(&desc);
        assert!(draft.contains("**Error:** FOO_JOB.B - JOBTERMINATED"));
        assert!(draft.contains("The job FOO_JOB.B - JOBTERMINATED terminated unexpectedly"));
    }

    #[test]
    fn test_template_keeps_fixed_structure() {
        let desc = IncidentDescription::new("X").expect("Failed to create description");
        let draft = draft_template(&desc);
        assert!(draft.starts_with("**KEDB Draft**"));
        assert!(draft.contains("**Resolution Steps**"));
        assert!(draft.contains("Step_Number: 2"));
    }
}
