//! Smoke test sequence against a live JIAuth service.
//!
//! The sequence assumes the service is seeded with the demo fixtures: user 6
//! may join `group`, user 4 may not, `other_group` does not exist, and the
//! calling application may log into itself.

use std::fmt;

use jiauth_client::{ApiResponse, ClientError, IdentityApi, Ticket, UserId};

const BOGUS_TICKET: &str = "ticket";
const UNKNOWN_APP: &str = "wtf";
const GROUP: &str = "group";
const MISSING_GROUP: &str = "other_group";
const FORBIDDEN_USER: UserId = UserId::new(4);
const MEMBER_USER: UserId = UserId::new(6);

/// What a step is expected to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// The service should refuse the call.
    Fail,
    /// The service should accept the call.
    Succeed,
}

/// Outcome of one smoke step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Section heading the step belongs to.
    pub section: &'static str,
    /// Call that was made.
    pub call: String,
    /// What the step should have done.
    pub expected: Expect,
    /// Whether the service accepted the call.
    pub succeeded: bool,
    /// Ticket, error code, or reason the step could not run.
    pub detail: String,
}

impl StepResult {
    fn from_response<T>(
        section: &'static str,
        call: String,
        expected: Expect,
        response: &ApiResponse<T>,
        describe: impl FnOnce(&T) -> String,
    ) -> Self {
        let (succeeded, detail) = match response {
            ApiResponse::Success(value) => (true, describe(value)),
            ApiResponse::Failure(err) => (false, format!("errorCode {}", err.error_code)),
        };
        Self {
            section,
            call,
            expected,
            succeeded,
            detail,
        }
    }

    /// Returns `true` if the service behaved as expected.
    #[must_use]
    pub fn as_expected(&self) -> bool {
        self.succeeded == (self.expected == Expect::Succeed)
    }
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.as_expected() { "ok" } else { "UNEXPECTED" };
        write!(f, "[{mark}] {} -> {}", self.call, self.detail)
    }
}

/// All steps of a smoke run.
#[derive(Debug, Clone, Default)]
pub struct SmokeReport {
    /// Steps in execution order.
    pub steps: Vec<StepResult>,
}

impl SmokeReport {
    /// Number of steps that did not behave as expected.
    #[must_use]
    pub fn unexpected(&self) -> usize {
        self.steps.iter().filter(|s| !s.as_expected()).count()
    }
}

impl fmt::Display for SmokeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut section = "";
        for step in &self.steps {
            if step.section != section {
                section = step.section;
                writeln!(f, "\n-- {section}")?;
            }
            writeln!(f, "{step}")?;
        }
        write!(
            f,
            "\n{} steps, {} unexpected",
            self.steps.len(),
            self.unexpected()
        )
    }
}

/// Run the smoke sequence as application `client_id`.
///
/// Service refusals are recorded in the report. Only transport and decode
/// failures abort the run.
///
/// # Errors
///
/// Returns the first `ClientError` raised by the API.
pub async fn run(api: &dyn IdentityApi, client_id: &str) -> Result<SmokeReport, ClientError> {
    let mut report = SmokeReport::default();
    let ok = |_: &()| "true".to_string();

    let section = "All should fail";
    let bogus = Ticket::new(BOGUS_TICKET).map_err(|e| ClientError::Decode(e.to_string()))?;
    let response = api.get_app_ticket(&bogus).await?;
    report.steps.push(StepResult::from_response(
        section,
        format!("get_app_ticket({BOGUS_TICKET})"),
        Expect::Fail,
        &response,
        |r| format!("user {}", r.user_id),
    ));
    let response = api.add_user_to_group(GROUP, FORBIDDEN_USER).await?;
    report.steps.push(StepResult::from_response(
        section,
        format!("add_user_to_group({GROUP}, {FORBIDDEN_USER})"),
        Expect::Fail,
        &response,
        ok,
    ));
    let response = api.remove_user_from_group(GROUP, FORBIDDEN_USER).await?;
    report.steps.push(StepResult::from_response(
        section,
        format!("remove_user_from_group({GROUP}, {FORBIDDEN_USER})"),
        Expect::Fail,
        &response,
        ok,
    ));
    let response = api.login(UNKNOWN_APP).await?;
    report.steps.push(StepResult::from_response(
        section,
        format!("login({UNKNOWN_APP})"),
        Expect::Fail,
        &response,
        ToString::to_string,
    ));

    let section = "Login should succeed";
    let login = api.login(client_id).await?;
    report.steps.push(StepResult::from_response(
        section,
        format!("login({client_id})"),
        Expect::Succeed,
        &login,
        ToString::to_string,
    ));
    match login {
        ApiResponse::Success(ticket) => {
            let response = api.get_app_ticket(&ticket).await?;
            report.steps.push(StepResult::from_response(
                section,
                "get_app_ticket(<issued ticket>)".to_string(),
                Expect::Succeed,
                &response,
                |r| format!("user {} ({}), {}", r.user_id, r.user_email, r.ticket_type),
            ));
        }
        ApiResponse::Failure(_) => {
            tracing::warn!(client_id, "self-login refused, skipping ticket lookup");
            report.steps.push(StepResult {
                section,
                call: "get_app_ticket(<issued ticket>)".to_string(),
                expected: Expect::Succeed,
                succeeded: false,
                detail: "skipped: no ticket issued".to_string(),
            });
        }
    }

    for (section, group, expected) in [
        ("Membership should succeed", GROUP, Expect::Succeed),
        ("Membership should fail", MISSING_GROUP, Expect::Fail),
    ] {
        let response = api.add_user_to_group(group, MEMBER_USER).await?;
        report.steps.push(StepResult::from_response(
            section,
            format!("add_user_to_group({group}, {MEMBER_USER})"),
            expected,
            &response,
            ok,
        ));
        let response = api.remove_user_from_group(group, MEMBER_USER).await?;
        report.steps.push(StepResult::from_response(
            section,
            format!("remove_user_from_group({group}, {MEMBER_USER})"),
            expected,
            &response,
            ok,
        ));
    }

    Ok(report)
}
