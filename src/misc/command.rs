/// Declares the command enum for an mpsc-driven state loop plus typed
/// senders: `CommandSender` awaits the reply over a oneshot channel,
/// `SpawnCommandSender` fires the command from a detached task and discards
/// the reply.
#[macro_export]
macro_rules! command {
    (
        $(
           $(#[$docs:meta])*
           $vis:vis $name:ident($($param:ident: $input:ty),*) $(-> $output:ty)?;
        )+
    ) => {
        pub enum Command {
        $(
            $(#[$docs])*
            $name {
                $($param: $input,)*
                resp_tx: tokio::sync::oneshot::Sender<($($output)?)>,
            },
        )+
        }

        #[derive(Clone)]
        pub struct CommandSender {
            tx: tokio::sync::mpsc::Sender<Command>,
        }

        #[allow(non_snake_case)]
        impl CommandSender {
        $(
            $vis async fn $name(&self, $($param: $input,)*) $(-> $output)? {
                let (resp_tx, resp_rx) = tokio::sync::oneshot::channel();
                let command = Command::$name { $($param,)* resp_tx };
                self.tx.send(command).await.unwrap();
                resp_rx.await.unwrap()
            }
        )+

            pub fn spawn(&self) -> SpawnCommandSender {
                SpawnCommandSender { tx: self.tx.clone() }
            }
        }

        pub struct SpawnCommandSender {
            tx: tokio::sync::mpsc::Sender<Command>,
        }

        #[allow(non_snake_case)]
        impl SpawnCommandSender {
        $(
            $vis fn $name(self, $($param: $input,)*) {
                let (resp_tx, resp_rx) = tokio::sync::oneshot::channel();
                let command = Command::$name { $($param,)* resp_tx };
                let tx = self.tx;
                tokio::spawn(async move {
                    tx.send(command).await.unwrap();
                    let _ = resp_rx.await;
                });
            }
        )+
        }
    };
}
