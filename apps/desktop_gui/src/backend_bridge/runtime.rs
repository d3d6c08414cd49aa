//! Backend worker: owns the tokio runtime and the API client, processes UI
//! commands sequentially, and reports outcomes as [`UiEvent`]s.

use crossbeam_channel::{Receiver, Sender};

use client_core::CustomerApi;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::ui::app::StartupConfig;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, startup: StartupConfig) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let api = match CustomerApi::new(&startup.server_url) {
                Ok(api) => api,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )));
                    tracing::error!(
                        server_url = %startup.server_url,
                        "invalid server url: {err}"
                    );
                    return;
                }
            };
            tracing::info!(endpoint = %api.endpoint(), "backend worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FetchCustomers => match api.list_customers().await {
                        Ok(customers) => {
                            let _ = ui_tx.try_send(UiEvent::CustomersLoaded(customers));
                        }
                        Err(err) => {
                            let _ = ui_tx.try_send(UiEvent::CustomersFetchFailed(
                                UiError::from_message(
                                    UiErrorContext::FetchCustomers,
                                    err.user_message(),
                                ),
                            ));
                        }
                    },
                    BackendCommand::CreateCustomer { payload } => {
                        match api.create_customer(&payload).await {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::CustomerCreated);
                            }
                            Err(err) => {
                                // Diagnostic only: the dialog stays open with
                                // the typed values and nothing is surfaced.
                                tracing::warn!(
                                    email = %payload.email,
                                    "customer creation failed: {err}"
                                );
                                let _ = ui_tx.try_send(UiEvent::CustomerCreateFailed);
                            }
                        }
                    }
                }
            }
        });
    });
}
