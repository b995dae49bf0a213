use std::io::Write;

use crate::api_client::ApiClient;

/// Checked in this order on every run.
pub const ENDPOINTS: &[&str] = &[
    "/api/test",
    "/api/donations",
    "/api/testimonials",
    "/api/admin/testimonials/pending/all",
];

/// Fetches each path in order and writes a block per endpoint. A failing
/// endpoint never stops the walk; only a failed write does.
pub async fn run_checks<W: Write>(
    client: &ApiClient,
    endpoints: &[&str],
    out: &mut W,
) -> std::io::Result<()> {
    for endpoint in endpoints {
        writeln!(out, "=== GET {} ===", endpoint)?;
        let outcome = client.fetch(endpoint).await;
        writeln!(out, "{}", outcome)?;
    }
    Ok(())
}
