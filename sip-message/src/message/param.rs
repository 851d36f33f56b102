use std::fmt;

use crate::ArcStr;

/// A collection of SIP parameters.
///
/// A parameter takes the form `name=value` and can appear in a SIP message as
/// either a URI parameter or a header parameter. Insertion order is kept and
/// names are matched case-insensitively.
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct Parameters {
    inner: Vec<Parameter>,
}

impl Parameters {
    /// Creates an empty `Parameters`.
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Returns the number of elements in the parameters.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns the parameter named `name`, if present.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.inner.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Gets the value of a parameter by name.
    ///
    /// Returns `None` both when the parameter is absent and when it is a
    /// flag without value; use [`Parameters::contains`] to tell them apart.
    pub fn get_named(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Parameter::value)
    }

    /// Returns `true` if a parameter named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets `name` to `value`, replacing an existing parameter in place or
    /// appending a new one.
    pub fn set(&mut self, name: &str, value: Option<&str>) {
        match self.inner.iter_mut().find(|p| p.name.eq_ignore_ascii_case(name)) {
            Some(param) => param.value = value.map(Into::into),
            None => self.inner.push(Parameter::new(name, value)),
        }
    }

    /// Removes the parameter named `name` and returns it.
    pub fn remove(&mut self, name: &str) -> Option<Parameter> {
        let idx = self.inner.iter().position(|p| p.name.eq_ignore_ascii_case(name))?;

        Some(self.inner.remove(idx))
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.inner.iter()
    }

    /// Pushes a new parameter into collection.
    pub fn push(&mut self, param: Parameter) {
        self.inner.push(param)
    }

    /// Checks if the parameter list is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for param in &self.inner {
            write!(f, ";{param}")?;
        }
        Ok(())
    }
}

impl<'a, const N: usize> From<[(&'a str, &'a str); N]> for Parameters {
    fn from(params: [(&'a str, &'a str); N]) -> Self {
        let inner = params
            .into_iter()
            .map(|(name, value)| Parameter::new(name, Some(value)))
            .collect();

        Self { inner }
    }
}

/// A parameter.
///
/// This struct represents a parameter in a SIP message, consisting of a name
/// and an optional value.
///
/// # Examples
///
/// ```
/// use sip_message::message::Parameter;
///
/// let param = Parameter::new("lr", None);
///
/// assert_eq!(param.name(), "lr");
/// assert_eq!(param.value(), None);
/// assert_eq!(param.to_string(), "lr");
/// ```
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct Parameter {
    pub(crate) name: ArcStr,
    pub(crate) value: Option<ArcStr>,
}

impl Parameter {
    /// Creates a new `Parameter` with the given `name` and optional `value`.
    pub fn new(name: &str, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(|v| v.into()),
        }
    }

    /// Returns the param `name`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the param `value` if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(value) = &self.value {
            write!(f, "={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = Parameters::from([("branch", "z9hG4bK1"), ("received", "10.0.0.1")]);
        params.set("BRANCH", Some("z9hG4bK2"));

        assert_eq!(params.len(), 2);
        assert_eq!(params.get_named("branch"), Some("z9hG4bK2"));
        assert_eq!(params.to_string(), ";branch=z9hG4bK2;received=10.0.0.1");
    }

    #[test]
    fn test_flag_parameter_is_present_without_value() {
        let mut params = Parameters::new();
        params.set("rport", None);

        assert!(params.contains("rport"));
        assert_eq!(params.get_named("rport"), None);
        assert_eq!(params.to_string(), ";rport");
    }

    #[test]
    fn test_remove_parameter() {
        let mut params = Parameters::from([("a", "1"), ("b", "2")]);

        assert_eq!(params.remove("a"), Some(Parameter::new("a", Some("1"))));
        assert_eq!(params.remove("a"), None);
        assert_eq!(params.len(), 1);
    }
}
