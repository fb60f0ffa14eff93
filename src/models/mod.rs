pub mod beacon;
pub mod rendezvous;

/// Outcome of a lookup that is expected to hit at most one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    /// More than one record matched; the store never picks one.
    Ambiguous,
}

impl<T> Lookup<T> {
    pub fn from_matches(mut matches: Vec<T>) -> Self {
        match matches.len() {
            0 => Lookup::NotFound,
            1 => matches.pop().map_or(Lookup::NotFound, Lookup::Found),
            _ => Lookup::Ambiguous,
        }
    }
}
