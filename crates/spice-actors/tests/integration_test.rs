use async_trait::async_trait;
use spice_actors::{ActorEntity, FrameworkError, ResourceActor};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: u32,
    table: String,
    served: bool,
}

#[derive(Debug)]
struct TicketCreate {
    table: String,
}

#[derive(Debug)]
enum TicketAction {
    Serve,
    Reassign(String),
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum TicketError {
    #[error("table name is empty")]
    EmptyTable,
    #[error("ticket already served")]
    AlreadyServed,
}

#[async_trait]
impl ActorEntity for Ticket {
    type Id = u32;
    type Create = TicketCreate;
    type Action = TicketAction;
    type ActionResult = bool;
    type Context = ();
    type Error = TicketError;

    fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, Self::Error> {
        if params.table.is_empty() {
            return Err(TicketError::EmptyTable);
        }
        Ok(Self {
            id,
            table: params.table,
            served: false,
        })
    }

    async fn handle_action(
        &mut self,
        action: TicketAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        match action {
            TicketAction::Serve => {
                if self.served {
                    return Err(TicketError::AlreadyServed);
                }
                self.served = true;
                Ok(true)
            }
            TicketAction::Reassign(table) => {
                // Mutate before failing to prove the actor discards partial changes.
                self.table = table;
                if self.served {
                    return Err(TicketError::AlreadyServed);
                }
                Ok(true)
            }
        }
    }
}

fn ticket(id: u32, table: &str) -> Ticket {
    Ticket {
        id,
        table: table.to_string(),
        served: false,
    }
}

#[tokio::test]
async fn create_get_and_act() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let id: u32 = client
        .create(TicketCreate {
            table: "T1".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, 1);

    assert!(client.perform_action(id, TicketAction::Serve).await.unwrap());
    let stored: Ticket = client.get(id).await.unwrap().unwrap();
    assert!(stored.served);

    let err = client
        .perform_action(id, TicketAction::Serve)
        .await
        .unwrap_err();
    assert_eq!(
        err.entity_error::<TicketError>(),
        Some(&TicketError::AlreadyServed)
    );
}

#[tokio::test]
async fn failed_action_leaves_resource_unchanged() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let id = client
        .create(TicketCreate {
            table: "T1".into(),
        })
        .await
        .unwrap();
    client.perform_action(id, TicketAction::Serve).await.unwrap();

    let result = client
        .perform_action(id, TicketAction::Reassign("T9".into()))
        .await;
    assert!(result.is_err());
    assert_eq!(client.get(id).await.unwrap().unwrap().table, "T1");
}

#[tokio::test]
async fn rejected_create_is_not_stored() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let err = client
        .create(TicketCreate { table: "".into() })
        .await
        .unwrap_err();
    assert_eq!(
        err.entity_error::<TicketError>(),
        Some(&TicketError::EmptyTable)
    );
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn seeded_ids_are_skipped_and_list_keeps_insertion_order() {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));

    client.seed(2, ticket(2, "seeded-two")).await.unwrap();
    client.seed(1, ticket(1, "seeded-one")).await.unwrap();

    let id = client
        .create(TicketCreate {
            table: "fresh".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, 3);

    let tables: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.table)
        .collect();
    assert_eq!(tables, vec!["seeded-two", "seeded-one", "fresh"]);
}

#[tokio::test]
async fn duplicate_seed_and_missing_id_are_reported() {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));

    client.seed(5, ticket(5, "T5")).await.unwrap();
    let dup = client.seed(5, ticket(5, "again")).await.unwrap_err();
    assert!(matches!(dup, FrameworkError::Duplicate(ref id) if id == "5"));

    let missing = client
        .perform_action(42, TicketAction::Serve)
        .await
        .unwrap_err();
    assert!(matches!(missing, FrameworkError::NotFound(ref id) if id == "42"));
    assert!(client.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn closed_actor_is_reported_to_callers() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    drop(actor);

    let err = client.get(1).await.unwrap_err();
    assert!(matches!(err, FrameworkError::ActorClosed));
}
