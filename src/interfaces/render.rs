use crate::domain::confirmation::{ATTEMPT_BUDGET, ConfirmationState};

/// Plain-text rendering of the confirmation views.
///
/// The success view links to the learning view when a course id is known
/// and to the student dashboard either way; the failed view links back to
/// the course listing.
pub fn render(state: &ConfirmationState) -> String {
    match state {
        ConfirmationState::Checking { attempt } => format!(
            "Verifying Payment...\n\
             Please wait while we confirm your payment (Attempt {attempt}/{ATTEMPT_BUDGET})"
        ),
        ConfirmationState::Success { course_id } => {
            let mut view = String::from(
                "Payment Successful!\n\
                 Congratulations! You are now enrolled in the course.\n",
            );
            if let Some(course_id) = course_id {
                view.push_str(&format!("  Start Learning: /course/{course_id}/learn\n"));
            }
            view.push_str("  View Dashboard: /dashboard/student");
            view
        }
        ConfirmationState::Failed => {
            let mut view = String::from(
                "Payment Verification Failed\n\
                 We couldn't verify your payment. Please try again or contact support.\n",
            );
            view.push_str("  Back to Courses: /courses");
            view
        }
    }
}
