//! # Resource Actor
//!
//! The server half of the runtime. A `ResourceActor<T>` owns every `T` it hosts and
//! drains its request channel one message at a time, so the store needs no lock.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Hosts a collection of `T` and serves [`ResourceRequest`]s for it.
///
/// Resources are kept in a `HashMap` for lookup plus an id list that preserves
/// insertion order for `List`. Ids for `Create` come from a `u32` counter that skips
/// any id already taken by a `Seed`.
///
/// ```rust
/// use spice_actors::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate(String);
/// #[derive(Debug)] enum NoteAction { Append(String) }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Action = NoteAction;
///     type ActionResult = usize;
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(id: u32, p: NoteCreate) -> Result<Self, NoteError> {
///         Ok(Self { id, text: p.0 })
///     }
///     async fn handle_action(&mut self, a: NoteAction, _: &()) -> Result<usize, NoteError> {
///         let NoteAction::Append(s) = a;
///         self.text.push_str(&s);
///         Ok(self.text.len())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(8);
///     tokio::spawn(actor.run(()));
///     let id = client.create(NoteCreate("hi".into())).await.unwrap();
///     let len = client.perform_action(id, NoteAction::Append("!".into())).await.unwrap();
///     assert_eq!(len, 3);
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` bounds the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    fn mint_id(&mut self) -> T::Id {
        loop {
            let id = T::Id::from(self.next_id);
            self.next_id += 1;
            if !self.store.contains_key(&id) {
                return id;
            }
        }
    }

    fn insert(&mut self, id: T::Id, item: T) {
        self.order.push(id.clone());
        self.store.insert(id, item);
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is handed to each `on_create` and `handle_action` call.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = self.mint_id();
                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, %id, error = %e, "on_create rejected");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Seed {
                    id,
                    entity,
                    respond_to,
                } => {
                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Seed collided with existing id");
                        let _ = respond_to.send(Err(FrameworkError::Duplicate(id.to_string())));
                        continue;
                    }
                    debug!(entity_type, %id, "Seeded");
                    self.insert(id, entity);
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self
                        .order
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    // Work on a copy so a failed action leaves the stored value untouched.
                    let mut draft = item.clone();
                    match draft.handle_action(action, &context).await {
                        Ok(result) => {
                            *item = draft;
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
