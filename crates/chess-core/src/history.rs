use crate::error::OracleError;

/// Caller-owned position handle: the initial position plus every position
/// reached since, so moves can be taken back without re-deriving anything.
#[derive(Debug, Clone)]
pub struct BoardHistory<P> {
    positions: Vec<P>,
}

impl<P: Clone> BoardHistory<P> {
    pub fn new(initial: P) -> Self {
        Self { positions: vec![initial] }
    }

    pub fn current(&self) -> &P {
        // `positions` is never empty: `undo` refuses to pop the root.
        &self.positions[self.positions.len() - 1]
    }

    pub fn initial(&self) -> &P {
        &self.positions[0]
    }

    pub fn push(&mut self, position: P) {
        self.positions.push(position);
    }

    /// Drop the latest position and return the one before it.
    pub fn undo(&mut self) -> Result<&P, OracleError> {
        if self.positions.len() <= 1 {
            return Err(OracleError::NothingToUndo);
        }
        self.positions.pop();
        Ok(self.current())
    }

    /// Go back to the initial position.
    pub fn rewind(&mut self) {
        self.positions.truncate(1);
    }

    /// Number of moves played since the initial position.
    pub fn len(&self) -> usize {
        self.positions.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_undo() {
        let mut history = BoardHistory::new("start");
        history.push("a");
        history.push("b");
        assert_eq!(*history.current(), "b");
        assert_eq!(history.len(), 2);

        assert_eq!(*history.undo().unwrap(), "a");
        assert_eq!(*history.undo().unwrap(), "start");
        assert_eq!(history.undo().unwrap_err(), OracleError::NothingToUndo);
        assert!(history.is_empty());
    }

    #[test]
    fn test_rewind() {
        let mut history = BoardHistory::new(0);
        for i in 1..5 {
            history.push(i);
        }
        history.rewind();
        assert_eq!(*history.current(), 0);
        assert_eq!(*history.initial(), 0);
        assert!(history.is_empty());
    }
}
