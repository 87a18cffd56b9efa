use std::env;

use tokio::io::{AsyncBufReadExt, BufReader};

use roster_client::config;
use roster_client::service::{ActivitiesApi, RosterService};

const USAGE: &str = "commands: list | reload | email <addr> | pick <activity> | signup [<email> <activity>] | withdraw <email> <activity> | quit";

#[tokio::main]
async fn main() {
    let base_url = env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_BASE_URL.to_string());
    let base_url = base_url.trim_end_matches('/').to_string();

    let api = ActivitiesApi::create(base_url.clone());
    let service = RosterService::create(api);

    println!("roster client, connected to {base_url}");
    println!("{USAGE}");
    service.op.LoadRoster().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };
        match cmd {
            "" => {}
            "quit" | "exit" => break,
            "list" => print!("{}", service.op.View().await),
            "reload" => service.op.LoadRoster().await,
            "email" => {
                let activity = service.op.View().await.form.activity;
                service.op.SetForm(rest.to_string(), activity).await;
            }
            "pick" => {
                let email = service.op.View().await.form.email;
                service.op.SetForm(email, rest.to_string()).await;
            }
            "signup" => {
                if !rest.is_empty() {
                    match rest.split_once(' ') {
                        Some((email, activity)) => {
                            service
                                .op
                                .SetForm(email.to_string(), activity.trim().to_string())
                                .await
                        }
                        None => {
                            println!("{USAGE}");
                            continue;
                        }
                    }
                }
                // required fields, enforced by the input controls
                if !service.op.View().await.form.is_complete() {
                    println!("email and activity are required");
                    continue;
                }
                service.op.SubmitSignup().await;
            }
            "withdraw" => match rest.split_once(' ') {
                Some((email, activity)) => {
                    service
                        .op
                        .Withdraw(email.to_string(), activity.trim().to_string())
                        .await
                }
                None => println!("{USAGE}"),
            },
            _ => println!("unknown command: {cmd}"),
        }
    }
}
