//! Integration tests for the host lifecycle

use crate::test_utils::{BrokenServer, EchoServer, SessionSweeper};
use mhs_domain::ports::{Host as HostPort, ServiceState};
use mhs_infrastructure::config::ConfigLoader;
use mhs_infrastructure::di::ServerScopeBuilder;
use mhs_infrastructure::hosting::HostBuilder;
use std::time::Duration;

/// Test that start and stop drive the scope-owned hosted services
#[tokio::test]
async fn test_start_and_stop_drive_server_services() {
    let host = HostBuilder::new()
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo").use_hosted_service::<SessionSweeper>())
        .build()
        .expect("build failed");
    let echo = host.server_scope("echo").expect("server declared");

    host.start().await.expect("start failed");
    let server = echo.fetch::<EchoServer>().expect("fetch failed");
    let sweeper = echo.fetch::<SessionSweeper>().expect("fetch failed");
    assert_eq!(server.0.starts(), 1);
    assert_eq!(sweeper.0.starts(), 1);

    let states: Vec<_> = host
        .hosted_services()
        .await
        .into_iter()
        .map(|info| (info.name, info.state))
        .collect();
    assert_eq!(
        states,
        vec![
            ("echo".to_string(), ServiceState::Running),
            ("echo-sweeper".to_string(), ServiceState::Running),
        ]
    );

    host.stop().await.expect("stop failed");
    assert_eq!(server.0.stops(), 1);
    assert_eq!(sweeper.0.stops(), 1);
}

/// Test that a host cannot be started twice
#[tokio::test]
async fn test_second_start_rejected() {
    let host = HostBuilder::new()
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo"))
        .build()
        .expect("build failed");

    host.start().await.expect("start failed");
    let error = host.start().await.expect_err("second start");
    assert!(error.is_unsupported());
    host.stop().await.expect("stop failed");
}

/// Test that a failed server start fails the host start
#[tokio::test]
async fn test_failed_server_start_fails_host() {
    let host = HostBuilder::new()
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo"))
        .add_server(ServerScopeBuilder::new::<BrokenServer>("broken"))
        .build()
        .expect("build failed");
    let echo = host
        .server_scope("echo")
        .expect("server declared")
        .fetch::<EchoServer>()
        .expect("fetch failed");

    let error = host.start().await.expect_err("start should fail");
    assert!(matches!(error, mhs_domain::Error::Lifecycle { ref service, .. } if service == "broken"));
    assert_eq!(echo.0.starts(), 1);
    assert_eq!(echo.0.stops(), 1);
}

/// Test that a stop requested through the host marker ends `run`
#[tokio::test]
async fn test_run_until_stop_requested_from_scope() {
    let host = HostBuilder::new()
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo"))
        .build()
        .expect("build failed");
    let echo = host.server_scope("echo").expect("server declared");
    let server = echo.fetch::<EchoServer>().expect("fetch failed");
    let handle = echo.fetch::<dyn HostPort>().expect("host marker forwarded");

    let running = tokio::spawn(host.run());
    while server.0.starts() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    handle.request_stop();

    tokio::time::timeout(Duration::from_secs(5), running)
        .await
        .expect("run did not finish")
        .expect("run panicked")
        .expect("run failed");
    assert_eq!(server.0.stops(), 1);
}

/// Test that a loaded configuration reaches server options
#[tokio::test]
async fn test_loaded_configuration_reaches_server() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mhs.toml");
    std::fs::write(
        &path,
        r#"
        [host]
        application_name = "relay"

        [servers.echo]
        port = 9090
        "#,
    )
    .expect("write config");

    let host = HostBuilder::from_loader(&ConfigLoader::new().with_config_path(&path))
        .expect("load failed")
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo"))
        .build()
        .expect("build failed");

    assert_eq!(host.environment().application_name, "relay");
    let server = host
        .server_scope("echo")
        .expect("server declared")
        .fetch::<EchoServer>()
        .expect("fetch failed");
    assert_eq!(server.0.port, 9090);
}
