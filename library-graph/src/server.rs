//! Serves the library schema over HTTP.
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQLRequest;
use async_graphql_axum::GraphQLResponse;
use axum::extract::State;
use axum::response::Html;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::configuration::Server;
use crate::error::ServerError;
use crate::schema::LibrarySchema;

/// The axum router answering GraphQL requests on the configured path.
///
/// The configuration is validated first: axum only accepts absolute paths.
pub fn router(
    configuration: &Server,
    schema: Arc<LibrarySchema>,
) -> Result<Router, ServerError> {
    configuration.validate()?;

    let mut route = post(graphql);
    if configuration.landing_page {
        let page = GraphiQLSource::build()
            .endpoint(&configuration.path)
            .finish();
        route = route.get(move || async move { Html(page) });
    }

    Ok(Router::new()
        .route(&configuration.path, route)
        .layer(TraceLayer::new_for_http())
        .with_state(schema))
}

async fn graphql(
    State(schema): State<Arc<LibrarySchema>>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

/// A bound, not yet serving, HTTP server.
pub struct HttpServer {
    listener: TcpListener,
    router: Router,
    path: String,
}

impl HttpServer {
    pub async fn bind(
        configuration: &Server,
        schema: Arc<LibrarySchema>,
    ) -> Result<Self, ServerError> {
        let router = router(configuration, schema)?;
        let address = configuration.listen;
        let listener = TcpListener::bind(address)
            .await
            .map_err(|error| ServerError::CannotBind { address, error })?;

        Ok(Self {
            listener,
            router,
            path: configuration.path.clone(),
        })
    }

    /// The address actually bound, which differs from the configured one
    /// when listening on port 0.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listener.local_addr().map_err(ServerError::LocalAddress)
    }

    /// Serves until `shutdown` completes, then drains in-flight requests.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = self.local_addr()?;
        tracing::info!("Server ready at http://{}{} 🚀", address, self.path);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Stopped");
        Ok(())
    }
}
