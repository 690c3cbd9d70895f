use crate::lattice::{Coord, Lattice, VertexId};

/// A walk through a graph, represented as the sequence of vertices it
/// visits.  Consecutive vertices were adjacent when the walk was taken.  A
/// walk always has at least one vertex.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Walk {
    vertices: Vec<VertexId>,
}

impl Walk {
    /// Creates a walk that starts, and so far ends, at `start`.
    pub fn new(start: VertexId) -> Self {
        Self {
            vertices: vec![start],
        }
    }

    /// Returns `None` if `vertices` is empty.
    pub fn from_vertices(vertices: Vec<VertexId>) -> Option<Self> {
        (!vertices.is_empty()).then_some(Self { vertices })
    }

    pub fn first_vertex(&self) -> VertexId {
        self.vertices[0]
    }

    pub fn last_vertex(&self) -> VertexId {
        self.vertices[self.vertices.len() - 1]
    }

    /// Number of vertices, counting repeats.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; a walk has at least one vertex.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of edges traversed.
    pub fn num_steps(&self) -> usize {
        self.vertices.len() - 1
    }

    pub fn is_closed(&self) -> bool {
        self.first_vertex() == self.last_vertex()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().copied()
    }

    pub fn as_slice(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Each traversed edge as a `(from, to)` pair, in walk order.
    pub fn steps(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.vertices.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn push(&mut self, v: VertexId) {
        self.vertices.push(v);
    }

    /// Appends `other` without repeating the shared vertex.  Panics if
    /// `other` does not begin where this walk ends.
    pub fn extend_with(&mut self, other: &Walk) {
        assert_eq!(
            other.first_vertex(),
            self.last_vertex(),
            "walks do not meet"
        );
        self.vertices.extend_from_slice(&other.vertices[1..]);
    }

    pub fn coords<'a>(&'a self, lattice: &'a Lattice) -> impl Iterator<Item = Coord> + 'a {
        self.vertices().map(|v| lattice.coord_of(v))
    }

    pub fn into_vertices(self) -> Vec<VertexId> {
        self.vertices
    }
}

impl Extend<VertexId> for Walk {
    fn extend<T: IntoIterator<Item = VertexId>>(&mut self, iter: T) {
        self.vertices.extend(iter);
    }
}
