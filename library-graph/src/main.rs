//! Main entry point for CLI command to start server.

fn main() -> anyhow::Result<()> {
    library_graph::main()
}
