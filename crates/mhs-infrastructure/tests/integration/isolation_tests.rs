//! Integration tests for server scope isolation
//!
//! Builds hosts through the public builder API and checks what crosses the
//! boundary between the host registry and each server scope.

use crate::test_utils::{EchoServer, Greeter, SessionSweeper, Unregistered, configuration};
use mhs_domain::ports::{
    ApplicationLifetime, ConfigurationRoot, Host as HostPort, HostLifetime, HostedService,
};
use mhs_domain::value_objects::{HostBuilderContext, HostEnvironment, LegacyHostingEnvironment};
use mhs_infrastructure::config::{AppConfig, JsonConfiguration};
use mhs_infrastructure::di::{
    LoggerFactory, ServerScopeBuilder, ServiceCollection, ServiceProvider,
};
use mhs_infrastructure::hosting::{Host, HostBuilder};
use std::sync::{Arc, Mutex};

fn scope(host: &Host, name: &str) -> Arc<ServiceProvider> {
    host.server_scope(name)
        .expect("server declared")
        .provider()
        .expect("scope built")
}

fn assert_same<T: ?Sized + 'static>(host: &ServiceProvider, scope: &ServiceProvider) {
    let from_host = host
        .get_required_service::<T>()
        .expect("resolve from host failed");
    let from_scope = scope
        .get_required_service::<T>()
        .expect("resolve from scope failed");
    assert!(
        Arc::ptr_eq(&from_host, &from_scope),
        "{} differs between host and scope",
        std::any::type_name::<T>()
    );
}

/// Test that every marker resolves to the host's own instance
#[test]
fn test_markers_resolve_to_host_instances() {
    let host = HostBuilder::new()
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo"))
        .build()
        .expect("build failed");
    let echo = scope(&host, "echo");
    let global = host.services();

    assert_same::<HostEnvironment>(global, &echo);
    assert_same::<LegacyHostingEnvironment>(global, &echo);
    assert_same::<HostBuilderContext>(global, &echo);
    assert_same::<dyn ConfigurationRoot>(global, &echo);
    assert_same::<dyn ApplicationLifetime>(global, &echo);
    assert_same::<dyn HostLifetime>(global, &echo);
    assert_same::<dyn HostPort>(global, &echo);
}

/// Test that host services outside the marker set stay in the host
#[test]
fn test_non_marker_services_not_forwarded() {
    let host = HostBuilder::new()
        .configure_services(|_, services| {
            services.add_singleton_instance(Arc::new(Greeter::new("host")));
            Ok(())
        })
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo"))
        .build()
        .expect("build failed");
    let echo = scope(&host, "echo");

    assert!(host.services().contains_service::<Greeter>());
    assert!(!echo.contains_service::<Greeter>());
    assert!(
        echo.get_service::<Greeter>()
            .expect("lookup failed")
            .is_none()
    );

    let host_loggers = host
        .services()
        .get_required_service::<LoggerFactory>()
        .expect("host logger factory");
    let scope_loggers = echo
        .get_required_service::<LoggerFactory>()
        .expect("scope logger factory");
    assert_eq!(host_loggers.scope(), "host");
    assert_eq!(scope_loggers.scope(), "echo");
}

/// Test that callbacks run in queue order and the last registration wins
#[test]
fn test_callbacks_apply_in_order_last_wins() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let (first, second) = (Arc::clone(&order), Arc::clone(&order));

    let server = ServerScopeBuilder::new::<EchoServer>("echo")
        .configure_services(move |_, services| {
            first.lock().expect("lock poisoned").push("first");
            services.add_singleton_instance(Arc::new(Greeter::new("first")));
            Ok(())
        })
        .configure_services(move |_, services| {
            second.lock().expect("lock poisoned").push("second");
            services.add_singleton_instance(Arc::new(Greeter::new("second")));
            Ok(())
        });
    let host = HostBuilder::new()
        .add_server(server)
        .build()
        .expect("build failed");
    let echo = scope(&host, "echo");

    assert_eq!(*order.lock().expect("lock poisoned"), vec!["first", "second"]);
    let greeter = echo
        .get_required_service::<Greeter>()
        .expect("resolve failed");
    assert_eq!(greeter.greeting, "second");
    let all: Vec<String> = echo
        .get_services::<Greeter>()
        .expect("resolve failed")
        .iter()
        .map(|g| g.greeting.clone())
        .collect();
    assert_eq!(all, vec!["first", "second"]);
}

/// Test the configuration/logging scenario: forwarded root, callback
/// service present, unregistered service absent
#[test]
fn test_forwarded_configuration_and_callback_services() {
    let c1 = configuration(serde_json::json!({ "servers": { "echo": { "port": 4040 } } }));
    let host = HostBuilder::from_config(AppConfig::default(), Arc::clone(&c1))
        .add_server(
            ServerScopeBuilder::new::<EchoServer>("echo").configure_services(|_, services| {
                services.add_singleton::<Greeter, _>(|_| Ok(Arc::new(Greeter::new("x"))));
                Ok(())
            }),
        )
        .build()
        .expect("build failed");
    let echo = scope(&host, "echo");

    let forwarded = echo
        .get_required_service::<dyn ConfigurationRoot>()
        .expect("configuration forwarded");
    assert!(Arc::ptr_eq(&forwarded, &c1));

    let x1 = echo.get_required_service::<Greeter>().expect("resolve failed");
    let x2 = echo.get_required_service::<Greeter>().expect("resolve failed");
    assert!(Arc::ptr_eq(&x1, &x2));

    assert!(
        echo.get_service::<Unregistered>()
            .expect("lookup failed")
            .is_none()
    );
    let error = echo
        .get_required_service::<Unregistered>()
        .expect_err("unregistered service");
    assert!(error.is_missing_service());

    let server = echo.get_required_service::<EchoServer>().expect("resolve failed");
    assert_eq!(server.0.port, 4040);
}

/// Test that two servers over one host registry share forwarded services
/// but keep their own singletons
#[test]
fn test_two_scopes_share_markers_not_singletons() {
    let register_greeter = |_: &HostBuilderContext,
                            services: &mut ServiceCollection|
     -> anyhow::Result<()> {
        services.add_singleton::<Greeter, _>(|provider| {
            Ok(Arc::new(Greeter::new(provider.scope_name())))
        });
        Ok(())
    };
    let host = HostBuilder::new()
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo").configure_services(register_greeter))
        .add_server(ServerScopeBuilder::new::<EchoServer>("chat").configure_services(register_greeter))
        .build()
        .expect("build failed");
    let (echo, chat) = (scope(&host, "echo"), scope(&host, "chat"));

    let host_config = host
        .services()
        .get_required_service::<dyn ConfigurationRoot>()
        .expect("host configuration");
    let echo_config = echo
        .get_required_service::<dyn ConfigurationRoot>()
        .expect("echo configuration");
    let chat_config = chat
        .get_required_service::<dyn ConfigurationRoot>()
        .expect("chat configuration");
    assert!(Arc::ptr_eq(&echo_config, &chat_config));
    assert!(Arc::ptr_eq(&echo_config, &host_config));

    let echo_greeter = echo.get_required_service::<Greeter>().expect("echo greeter");
    let chat_greeter = chat.get_required_service::<Greeter>().expect("chat greeter");
    assert!(!Arc::ptr_eq(&echo_greeter, &chat_greeter));
    assert_eq!(echo_greeter.greeting, "echo");
    assert_eq!(chat_greeter.greeting, "chat");

    let echo_server = echo.get_required_service::<EchoServer>().expect("echo server");
    let chat_server = chat.get_required_service::<EchoServer>().expect("chat server");
    assert!(!Arc::ptr_eq(&echo_server, &chat_server));
}

/// Test that a factory-registered marker is built from host services even
/// when a server scope resolves it first
#[test]
fn test_factory_marker_never_built_from_scope_services() {
    let host = HostBuilder::new()
        .configure_services(|_, services| {
            services.add_singleton::<dyn ConfigurationRoot, _>(|provider| {
                let loggers = provider.get_required_service::<LoggerFactory>()?;
                let root: Arc<dyn ConfigurationRoot> = Arc::new(JsonConfiguration::new(
                    serde_json::json!({ "built_in": loggers.scope() }),
                ));
                Ok(root)
            });
            Ok(())
        })
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo").validate_on_build(true))
        .add_server(ServerScopeBuilder::new::<EchoServer>("chat"))
        .build()
        .expect("build failed");

    let from_echo = scope(&host, "echo")
        .get_required_service::<dyn ConfigurationRoot>()
        .expect("echo configuration");
    let from_host = host
        .services()
        .get_required_service::<dyn ConfigurationRoot>()
        .expect("host configuration");
    let from_chat = scope(&host, "chat")
        .get_required_service::<dyn ConfigurationRoot>()
        .expect("chat configuration");

    assert_eq!(from_host.section("built_in"), Some(serde_json::json!("host")));
    assert!(Arc::ptr_eq(&from_echo, &from_host));
    assert!(Arc::ptr_eq(&from_chat, &from_host));
}

/// Test that the host-side hosted service is the scope's singleton
#[test]
fn test_hosted_service_resolves_to_scope_singleton() {
    let host = HostBuilder::new()
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo").use_hosted_service::<SessionSweeper>())
        .build()
        .expect("build failed");
    let echo = host.server_scope("echo").expect("server declared");

    let first = host
        .services()
        .get_services::<dyn HostedService>()
        .expect("resolve failed");
    let second = host
        .services()
        .get_services::<dyn HostedService>()
        .expect("resolve failed");
    assert_eq!(first.len(), 2);
    assert!(first.iter().zip(&second).all(|(a, b)| Arc::ptr_eq(a, b)));

    let server: Arc<dyn HostedService> = echo.fetch::<EchoServer>().expect("fetch failed");
    let sweeper: Arc<dyn HostedService> = echo.fetch::<SessionSweeper>().expect("fetch failed");
    assert!(Arc::ptr_eq(&first[0], &server));
    assert!(Arc::ptr_eq(&first[1], &sweeper));
    assert_eq!(first[1].name(), "echo-sweeper");
}

/// Test that declaring the same hosted type twice bridges one instance twice
#[test]
fn test_duplicate_hosted_type_is_additive() {
    let host = HostBuilder::new()
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo").use_hosted_service::<EchoServer>())
        .build()
        .expect("build failed");

    let hosted = host
        .services()
        .get_services::<dyn HostedService>()
        .expect("resolve failed");
    assert_eq!(hosted.len(), 2);
    assert!(Arc::ptr_eq(&hosted[0], &hosted[1]));
}

/// Test that a bridge cannot resolve before its scope is built
#[test]
fn test_bridge_before_build_is_fatal() {
    let builder = ServerScopeBuilder::new::<EchoServer>("echo");
    let mut host_services = ServiceCollection::new();
    builder.register_bridges(&mut host_services);
    let provider = ServiceProvider::new("host", host_services);

    let error = provider
        .get_required_service::<dyn HostedService>()
        .err()
        .expect("bridge must fail before build");
    assert!(error.is_scope_not_built());
}

/// Test that server names must be unique
#[test]
fn test_duplicate_server_names_rejected() {
    let error = HostBuilder::new()
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo"))
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo"))
        .build()
        .err()
        .expect("duplicate server");
    assert!(matches!(error, mhs_domain::Error::DuplicateServer { ref name } if name == "echo"));
}

/// Test that a failing server callback fails the host build
#[test]
fn test_failing_server_callback_fails_host_build() {
    let error = HostBuilder::new()
        .add_server(
            ServerScopeBuilder::new::<EchoServer>("echo")
                .configure_services(|_, _| anyhow::bail!("invalid listener address")),
        )
        .build()
        .err()
        .expect("build should fail");
    assert!(error.is_configuration());
    assert!(error.to_string().contains("echo"));
}

/// Test that server callbacks see the host context
#[test]
fn test_callbacks_receive_host_context() {
    let seen = Arc::new(Mutex::new(None));
    let captured = Arc::clone(&seen);
    let mut config = AppConfig::default();
    config.host.environment = "Staging".to_string();

    HostBuilder::from_config(config, configuration(serde_json::json!({})))
        .property("region", serde_json::json!("eu-west"))
        .add_server(
            ServerScopeBuilder::new::<EchoServer>("echo").configure_services(move |context, _| {
                *captured.lock().expect("lock poisoned") = Some((
                    context.environment().is_staging(),
                    context.property("region").cloned(),
                ));
                Ok(())
            }),
        )
        .build()
        .expect("build failed");

    assert_eq!(
        *seen.lock().expect("lock poisoned"),
        Some((true, Some(serde_json::json!("eu-west"))))
    );
}

/// Test that concurrent first resolution constructs one server instance
#[test]
fn test_concurrent_first_resolution_in_scope() {
    let host = HostBuilder::new()
        .add_server(ServerScopeBuilder::new::<EchoServer>("echo"))
        .build()
        .expect("build failed");
    let echo = scope(&host, "echo");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let echo = Arc::clone(&echo);
            std::thread::spawn(move || {
                echo.get_required_service::<EchoServer>()
                    .expect("resolve failed")
            })
        })
        .collect();
    let resolved: Vec<Arc<EchoServer>> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread panicked"))
        .collect();

    assert!(resolved.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}
