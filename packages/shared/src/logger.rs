//! Logging setup for the wagate binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Library crate whose logs every binary wants to see.
const SERVER_CRATE: &str = "wagate_server";

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Covers the server library, the binary itself and the HTTP trace layer.
/// The binary target is listed once even when it shares the library's name.
pub fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut targets = vec![SERVER_CRATE];
    if binary_target != SERVER_CRATE {
        targets.push(binary_target.as_str());
    }
    targets.push("tower_http");

    targets
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "wagate-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use wagate_shared::logger::setup_logger;
///
/// setup_logger("wagate-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_lists_server_binary_once() {
        // テスト項目: バイナリ名がライブラリ名と同じ場合は重複しない
        // given (前提条件):
        let binary_name = "wagate-server";

        // when (操作):
        let directive = default_directive(binary_name, "debug");

        // then (期待する結果):
        assert_eq!(directive, "wagate_server=debug,tower_http=debug");
    }

    #[test]
    fn test_default_directive_adds_other_binary() {
        // テスト項目: 別名のバイナリはハイフンをアンダースコアに変換して追加される
        let directive = default_directive("wagate-admin", "info");

        assert_eq!(
            directive,
            "wagate_server=info,wagate_admin=info,tower_http=info"
        );
    }

    #[test]
    fn test_default_directive_parses_as_env_filter() {
        // テスト項目: 生成したディレクティブが EnvFilter として解釈できる
        let directive = default_directive("wagate-admin", "info");

        assert!(EnvFilter::try_new(directive).is_ok());
    }
}
