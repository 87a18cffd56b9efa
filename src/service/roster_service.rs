use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::model::RosterSnapshot;
use crate::service::{ActivitiesApi, ApiError};
use crate::view::{render, Banner, RosterView, SignupForm};
use crate::{command, config, log};

const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";
const SIGNUP_FAILED: &str = "An error occurred";
const WITHDRAW_FAILED: &str = "An error occurred";

command! {
    /// Kick off a full roster fetch; the snapshot is replaced when the
    /// response arrives.
    pub LoadRoster();
    /// Edit the signup input controls.
    pub SetForm(email: String, activity: String);
    /// Submit the current form to the signup endpoint.
    pub SubmitSignup();
    /// The delegated participant-row action, identified by the pair bound
    /// at render time.
    pub Withdraw(email: String, activity: String);
    /// Render the current state.
    pub View() -> RosterView;

    ApplySnapshot(seq: u64, result: Result<RosterSnapshot, ApiError>);
    FinishSignup(result: Result<String, ApiError>);
    FinishWithdraw(email: String, activity: String, result: Result<(), ApiError>);
    DismissBanner(generation: u64);
}

/// Owns all mutable client state behind one command loop, the analog of the
/// page's single-threaded event loop. Requests run in spawned tasks and
/// report back through the same channel, so state is never touched
/// concurrently and races reduce to ordering, which the sequence tokens
/// resolve.
pub struct RosterService {
    pub op: CommandSender,
}

impl RosterService {
    pub fn create(api: ActivitiesApi) -> RosterService {
        Self::create_with(api, config::BANNER_TIMEOUT)
    }

    pub fn create_with(api: ActivitiesApi, banner_timeout: Duration) -> RosterService {
        let (tx, mut rx) = mpsc::channel::<Command>(config::COMMAND_BUFFER);
        let op = CommandSender { tx };
        let service = RosterService { op: op.clone() };

        tokio::spawn(async move {
            use Command::*;
            let mut state = RosterState::default();

            while let Some(command) = rx.recv().await {
                match command {
                    LoadRoster { resp_tx } => {
                        start_load(&mut state, &api, &op);
                        resp_tx.send(()).unwrap();
                    }
                    SetForm {
                        email,
                        activity,
                        resp_tx,
                    } => {
                        state.form = SignupForm { email, activity };
                        resp_tx.send(()).unwrap();
                    }
                    SubmitSignup { resp_tx } => {
                        let SignupForm { email, activity } = state.form.clone();
                        let api = api.clone();
                        let op = op.clone();
                        tokio::spawn(async move {
                            let result = api.signup(&activity, &email).await;
                            op.FinishSignup(result).await;
                        });
                        resp_tx.send(()).unwrap();
                    }
                    Withdraw {
                        email,
                        activity,
                        resp_tx,
                    } => {
                        let api = api.clone();
                        let op = op.clone();
                        tokio::spawn(async move {
                            let result = api.unregister(&activity, &email).await;
                            op.FinishWithdraw(email, activity, result).await;
                        });
                        resp_tx.send(()).unwrap();
                    }
                    View { resp_tx } => {
                        resp_tx.send(state.view()).unwrap();
                    }
                    ApplySnapshot {
                        seq,
                        result,
                        resp_tx,
                    } => {
                        state.apply_snapshot(seq, result);
                        resp_tx.send(()).unwrap();
                    }
                    FinishSignup { result, resp_tx } => {
                        state.finish_signup(result);
                        schedule_dismiss(&state, &op, banner_timeout);
                        resp_tx.send(()).unwrap();
                    }
                    FinishWithdraw {
                        email,
                        activity,
                        result,
                        resp_tx,
                    } => {
                        if state.finish_withdraw(&email, &activity, result) {
                            start_load(&mut state, &api, &op);
                        }
                        schedule_dismiss(&state, &op, banner_timeout);
                        resp_tx.send(()).unwrap();
                    }
                    DismissBanner {
                        generation,
                        resp_tx,
                    } => {
                        state.dismiss_banner(generation);
                        resp_tx.send(()).unwrap();
                    }
                }
            }
        });

        service
    }
}

fn start_load(state: &mut RosterState, api: &ActivitiesApi, op: &CommandSender) {
    state.load_seq += 1;
    let seq = state.load_seq;
    let api = api.clone();
    let op = op.clone();
    tokio::spawn(async move {
        let result = api.fetch_activities().await;
        op.ApplySnapshot(seq, result).await;
    });
}

fn schedule_dismiss(state: &RosterState, op: &CommandSender, timeout: Duration) {
    if state.banner.is_hidden() {
        return;
    }
    let token = state.banner_timer.clone();
    let generation = state.banner_generation;
    let op = op.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            _ = tokio::time::sleep(timeout) => op.spawn().DismissBanner(generation),
        }
    });
}

#[derive(Default)]
struct RosterState {
    snapshot: RosterSnapshot,
    load_error: Option<String>,
    form: SignupForm,
    banner: Banner,
    load_seq: u64,
    banner_generation: u64,
    banner_timer: CancellationToken,
}

impl RosterState {
    fn view(&self) -> RosterView {
        render(
            &self.snapshot,
            self.load_error.as_deref(),
            &self.form,
            &self.banner,
        )
    }

    fn apply_snapshot(&mut self, seq: u64, result: Result<RosterSnapshot, ApiError>) {
        if seq < self.load_seq {
            log!("dropping stale roster load #{seq}");
            return;
        }
        match result {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.load_error = None;
            }
            Err(e) => {
                eprintln!("roster load failed: {e}");
                self.load_error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    fn finish_signup(&mut self, result: Result<String, ApiError>) {
        match result {
            Ok(message) => {
                self.form.clear();
                self.show_banner(Banner::Success(message));
            }
            Err(e) => {
                eprintln!("signup failed: {e}");
                self.show_banner(Banner::Error(e.user_message(SIGNUP_FAILED)));
            }
        }
    }

    /// Returns whether the roster must be reloaded. Withdrawals resync the
    /// snapshot; signups do not (the upstream asymmetry is kept on purpose,
    /// see DESIGN.md).
    fn finish_withdraw(&mut self, email: &str, activity: &str, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                self.show_banner(Banner::Success(format!("Removed {email} from {activity}")));
                true
            }
            Err(e) => {
                eprintln!("withdraw failed: {e}");
                self.show_banner(Banner::Error(e.user_message(WITHDRAW_FAILED)));
                false
            }
        }
    }

    /// A new banner takes ownership of dismissal: the previous timer is
    /// cancelled and its generation invalidated, so an older action's timer
    /// can never erase a newer message.
    fn show_banner(&mut self, banner: Banner) {
        self.banner = banner;
        self.banner_generation += 1;
        self.banner_timer.cancel();
        self.banner_timer = CancellationToken::new();
    }

    fn dismiss_banner(&mut self, generation: u64) {
        if generation == self.banner_generation {
            self.banner = Banner::Hidden;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ListView;
    use hyper::StatusCode;

    fn snapshot(names: &[&str]) -> RosterSnapshot {
        names
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    crate::model::Activity {
                        description: "d".to_string(),
                        schedule: "s".to_string(),
                        max_participants: 10,
                        participants: Vec::new(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn stale_snapshot_never_overwrites_a_newer_load() {
        let mut state = RosterState::default();
        state.load_seq = 2;
        state.apply_snapshot(2, Ok(snapshot(&["Chess Club"])));
        state.apply_snapshot(1, Ok(snapshot(&["Stale Club"])));
        assert!(state.snapshot.get("Chess Club").is_some());
        assert!(state.snapshot.get("Stale Club").is_none());
    }

    #[test]
    fn failed_load_degrades_the_list_but_keeps_the_snapshot() {
        let mut state = RosterState::default();
        state.load_seq = 1;
        state.apply_snapshot(1, Ok(snapshot(&["Chess Club"])));
        state.load_seq = 2;
        state.apply_snapshot(
            2,
            Err(ApiError::Transport("connection refused".to_string())),
        );
        let view = state.view();
        assert_eq!(view.list, ListView::Failed(LOAD_FAILED.to_string()));
        assert_eq!(view.selector, vec!["Chess Club"]);
    }

    #[test]
    fn successful_signup_clears_the_form() {
        let mut state = RosterState::default();
        state.form = SignupForm {
            email: "a@x.com".to_string(),
            activity: "Chess Club".to_string(),
        };
        state.finish_signup(Ok("Signed up!".to_string()));
        assert_eq!(state.banner, Banner::Success("Signed up!".to_string()));
        assert_eq!(state.form, SignupForm::default());
    }

    #[test]
    fn failed_signup_keeps_the_form() {
        let mut state = RosterState::default();
        state.form = SignupForm {
            email: "a@x.com".to_string(),
            activity: "Chess Club".to_string(),
        };
        state.finish_signup(Err(ApiError::from_failure(
            StatusCode::BAD_REQUEST,
            br#"{"detail":"Already signed up"}"#,
        )));
        assert_eq!(state.banner, Banner::Error("Already signed up".to_string()));
        assert_eq!(state.form.email, "a@x.com");
        assert_eq!(state.form.activity, "Chess Club");
    }

    #[test]
    fn successful_withdraw_names_both_and_requests_a_reload() {
        let mut state = RosterState::default();
        let reload = state.finish_withdraw("a@x.com", "Chess Club", Ok(()));
        assert!(reload);
        let message = state.banner.message().unwrap();
        assert!(message.contains("a@x.com"));
        assert!(message.contains("Chess Club"));
    }

    #[test]
    fn failed_withdraw_does_not_reload() {
        let mut state = RosterState::default();
        let reload = state.finish_withdraw(
            "a@x.com",
            "Chess Club",
            Err(ApiError::from_failure(
                StatusCode::BAD_REQUEST,
                br#"{"detail":"Student is not registered"}"#,
            )),
        );
        assert!(!reload);
        assert_eq!(
            state.banner,
            Banner::Error("Student is not registered".to_string())
        );
    }

    #[test]
    fn a_newer_banner_invalidates_the_older_dismissal() {
        let mut state = RosterState::default();
        state.show_banner(Banner::Error("first".to_string()));
        let first_generation = state.banner_generation;
        state.show_banner(Banner::Success("second".to_string()));

        state.dismiss_banner(first_generation);
        assert_eq!(state.banner, Banner::Success("second".to_string()));

        state.dismiss_banner(state.banner_generation);
        assert_eq!(state.banner, Banner::Hidden);
    }
}
