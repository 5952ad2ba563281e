//! Handler for the XML-RPC endpoint.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::infrastructure::xmlrpc::codec::{self, MethodCall};
use crate::state::AppState;

/// Dispatches inbound XML-RPC method calls.
///
/// # Endpoint
///
/// `POST /xmlrpc`
///
/// # Methods
///
/// - `pingback.ping(sourceURI, targetURI)` - registers a pingback; replies
///   with the registration string on success or a bare integer code on
///   protocol failure
/// - `pingback.extensions.getPingbacks(targetURI)` - lists the source URLs
///   of the target's registered pingbacks
///
/// Malformed documents and unknown methods are answered with an XML-RPC
/// fault; protocol-level rejections are not faults but integer return
/// values, which is what remote pingback clients expect.
pub async fn xmlrpc_handler(State(state): State<AppState>, body: String) -> Response {
    let call = match codec::parse_method_call(&body) {
        Ok(call) => call,
        Err(e) => {
            tracing::debug!(error = %e, "unparseable XML-RPC request");
            return xml(codec::build_fault(-32700, "parse error. not well formed"));
        }
    };

    xml(dispatch(&state, call).await)
}

async fn dispatch(state: &AppState, call: MethodCall) -> String {
    match call.name.as_str() {
        "pingback.ping" => {
            let [source, target] = call.params.as_slice() else {
                return codec::build_fault(
                    -32602,
                    "server error. invalid method parameters: pingback.ping takes (sourceURI, targetURI)",
                );
            };
            match state.pingback_service.ping(source, target).await {
                Ok(message) => codec::build_string_response(&message),
                Err(fault) => codec::build_int_response(fault.code()),
            }
        }
        "pingback.extensions.getPingbacks" => {
            let [target] = call.params.as_slice() else {
                return codec::build_fault(
                    -32602,
                    "server error. invalid method parameters: getPingbacks takes (targetURI)",
                );
            };
            match state.pingback_service.get_pingbacks(target).await {
                Ok(sources) => codec::build_array_response(&sources),
                Err(fault) => codec::build_int_response(fault.code()),
            }
        }
        other => codec::build_fault(
            -32601,
            &format!("server error. requested method {other} not found"),
        ),
    }
}

fn xml(doc: String) -> Response {
    ([(header::CONTENT_TYPE, "text/xml; charset=utf-8")], doc).into_response()
}
