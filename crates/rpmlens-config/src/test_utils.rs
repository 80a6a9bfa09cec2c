use std::env;

/// Runs `f` with each variable set to `Some(value)` or removed for `None`,
/// then puts the previous environment back. Pair with `#[serial]`.
pub fn with_env<F>(vars: &[(&str, Option<&str>)], f: F)
where
    F: FnOnce(),
{
    let saved: Vec<_> = vars.iter().map(|(key, _)| (*key, env::var(key).ok())).collect();

    apply(vars.iter().map(|(key, value)| (*key, *value)));
    f();
    apply(saved.iter().map(|(key, value)| (*key, value.as_deref())));
}

fn apply<'a>(vars: impl Iterator<Item = (&'a str, Option<&'a str>)>) {
    for (key, value) in vars {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
}
