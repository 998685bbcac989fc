//! Process-wide signal registry lifecycle.
//!
//! Kept in its own test binary so the registry starts out uninstalled.

use bridgescope::prelude::*;

#[test]
fn global_registry_lifecycle() -> Result<()> {
    assert!(SignalRegistry::global().is_none());
    assert!(matches!(
        SignalClassifier::global(),
        Err(Error::RegistryUninitialized)
    ));

    let installed = SignalRegistry::install(SignalRegistry::python())?;
    assert_eq!(installed.len(), 2);

    assert!(matches!(
        SignalRegistry::install(SignalRegistry::default()),
        Err(Error::RegistryInitialized)
    ));
    assert_eq!(SignalRegistry::global().map(SignalRegistry::len), Some(2));

    let classifier = SignalClassifier::global()?;
    let table = ErrorTable::new();
    let scope = table.scope(table.capture(GuestError::new("StopIteration", "done")));
    let signal = classifier.classify(&table, scope.handle())?;
    assert_eq!(signal.map(|s| s.kind()), Some(SignalKind::IterationExhausted));
    Ok(())
}
