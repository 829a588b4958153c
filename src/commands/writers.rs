//! List registered writers

use reconciler::registry::WriterRegistry;

/// Print the names of all registered writers, one per line
pub fn list_writers() -> anyhow::Result<()> {
    let registry = WriterRegistry::with_builtin();
    for name in registry.names() {
        if name == WriterRegistry::DEFAULT {
            println!("{name} (default)");
        } else {
            println!("{name}");
        }
    }
    Ok(())
}
