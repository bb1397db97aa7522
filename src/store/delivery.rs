//! Single cross-thread handoff of a produced graph into the store.
//!
//! Scanning/parsing runs elsewhere; the producer sends exactly one complete
//! payload, and the receiving side installs it with `GraphStore::set_graph`,
//! so the store never sees nodes without their edges.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Mutex;
use std::thread;

use crate::error::AppError;
use crate::models::Graph;

use super::GraphStore;

/// Sending half, owned by the producer.
pub struct GraphProducer {
    tx: Sender<Result<Graph, AppError>>,
}

/// Receiving half, polled once per frame by the consumer.
pub struct GraphDelivery {
    rx: Mutex<Receiver<Result<Graph, AppError>>>,
}

/// Outcome of polling a delivery.
#[derive(Debug)]
pub enum DeliveryStatus {
    /// Nothing arrived yet.
    Pending,
    /// A graph was installed.
    Installed { nodes: usize, edges: usize },
    /// The producer or the store rejected the payload; the store is unchanged.
    Failed(AppError),
}

/// Create a connected producer/delivery pair.
pub fn channel() -> (GraphProducer, GraphDelivery) {
    let (tx, rx) = mpsc::channel();
    (GraphProducer { tx }, GraphDelivery { rx: Mutex::new(rx) })
}

impl GraphProducer {
    /// Hand over the payload. Returns false if the consumer is gone.
    pub fn deliver(self, payload: Result<Graph, AppError>) -> bool {
        self.tx.send(payload).is_ok()
    }

    /// Run `produce` on a background thread and deliver its result.
    pub fn spawn<F>(self, produce: F) -> thread::JoinHandle<()>
    where
        F: FnOnce() -> Result<Graph, AppError> + Send + 'static,
    {
        thread::spawn(move || {
            if !self.deliver(produce()) {
                tracing::debug!("Graph consumer dropped before delivery");
            }
        })
    }
}

impl GraphDelivery {
    /// Install a delivered graph into `store`, if one has arrived.
    pub fn poll_into(&self, store: &mut GraphStore) -> DeliveryStatus {
        let received = match self.rx.lock() {
            Ok(rx) => rx.try_recv(),
            Err(_) => return DeliveryStatus::Pending,
        };

        match received {
            Ok(Ok(graph)) => {
                let (nodes, edges) = (graph.node_count(), graph.edge_count());
                match store.set_graph(graph) {
                    Ok(()) => DeliveryStatus::Installed { nodes, edges },
                    Err(e) => DeliveryStatus::Failed(e),
                }
            }
            Ok(Err(e)) => DeliveryStatus::Failed(e),
            Err(TryRecvError::Empty) => DeliveryStatus::Pending,
            Err(TryRecvError::Disconnected) => DeliveryStatus::Failed(AppError::ProducerGone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edge, EdgeType, Node, NodeType};

    #[test]
    fn test_delivery_installs_graph() {
        let (producer, delivery) = channel();
        let mut store = GraphStore::new();
        assert!(matches!(delivery.poll_into(&mut store), DeliveryStatus::Pending));

        let handle = producer.spawn(|| {
            let mut graph = Graph::new();
            graph.add_node(Node::new("a", NodeType::Module, "A"));
            graph.add_node(Node::new("b", NodeType::Module, "B"));
            graph.add_edge(Edge::new("a", "b", EdgeType::Uses));
            Ok(graph)
        });
        handle.join().unwrap();

        match delivery.poll_into(&mut store) {
            DeliveryStatus::Installed { nodes, edges } => {
                assert_eq!((nodes, edges), (2, 1));
            }
            other => panic!("unexpected status: {other:?}"),
        }
        assert_eq!(store.filtered_nodes().len(), 2);
    }

    #[test]
    fn test_failed_delivery_leaves_store_unchanged() {
        let (producer, delivery) = channel();
        let mut store = GraphStore::new();
        producer.deliver(Err(AppError::Io(std::io::Error::other("scan cancelled"))));
        assert!(matches!(
            delivery.poll_into(&mut store),
            DeliveryStatus::Failed(_)
        ));
        assert!(store.graph().is_none());
    }

    #[test]
    fn test_invalid_graph_rejected() {
        let (producer, delivery) = channel();
        let mut store = GraphStore::new();
        let mut graph = Graph::new();
        graph.add_edge(Edge::new("x", "y", EdgeType::Calls));
        producer.deliver(Ok(graph));
        assert!(matches!(
            delivery.poll_into(&mut store),
            DeliveryStatus::Failed(AppError::Integrity(_))
        ));
        assert!(store.graph().is_none());
    }
}
