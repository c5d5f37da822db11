//! Utilities for building HTTP endpoints in a library-agnostic manner.

use serde::{
    Deserialize, Serialize, de,
    ser::{self, SerializeMap as _},
};

use crate::{
    FieldError, GraphQLError, Value, Variables, executor::ExecutionError, schema::model::SchemaType,
};

/// The expected structure of the decoded JSON document for either POST or GET
/// requests.
///
/// For POST, the body deserializes into this struct directly. For GET, the
/// `query`, `operationName` and `variables` parameters have to be extracted
/// from the query string manually.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GraphQLRequest {
    /// GraphQL query representing this request.
    pub query: String,

    /// Optional name of the operation associated with this request.
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,

    /// Optional variables to execute the GraphQL operation with.
    pub variables: Option<Variables>,
}

impl GraphQLRequest {
    /// Construct a new GraphQL request from parts.
    pub fn new(query: String, operation_name: Option<String>, variables: Option<Variables>) -> Self {
        Self {
            query,
            operation_name,
            variables,
        }
    }

    /// Variables of this request, empty if none were sent.
    pub fn variables(&self) -> Variables {
        self.variables.clone().unwrap_or_default()
    }

    /// Execute a GraphQL request synchronously using the specified schema and
    /// context.
    ///
    /// This is a simple wrapper around the [`execute_sync`](crate::execute_sync)
    /// function.
    pub fn execute_sync<Ctx: Sync>(
        &self,
        schema: &SchemaType<Ctx>,
        root_value: Value,
        context: &Ctx,
    ) -> GraphQLResponse {
        GraphQLResponse(crate::execute_sync(
            &self.query,
            self.operation_name.as_deref(),
            schema,
            root_value,
            &self.variables(),
            context,
        ))
    }

    /// Execute a GraphQL request using the specified schema and context.
    ///
    /// This is a simple wrapper around the [`execute`](crate::execute)
    /// function.
    pub async fn execute<Ctx: Sync>(
        &self,
        schema: &SchemaType<Ctx>,
        root_value: Value,
        context: &Ctx,
    ) -> GraphQLResponse {
        let op = self.operation_name.as_deref();
        let vars = &self.variables();
        let res = crate::execute(&self.query, op, schema, root_value, vars, context).await;
        GraphQLResponse(res)
    }
}

/// Simple wrapper around the result from executing a GraphQL query.
///
/// Serializes into the `{"data": ..., "errors": [...]}` response shape. Use
/// [`GraphQLResponse::is_ok`] to determine whether to send a 200 or a 400
/// HTTP status code.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphQLResponse(Result<(Value, Vec<ExecutionError>), GraphQLError>);

impl GraphQLResponse {
    /// Constructs a new [`GraphQLResponse`] using the given result.
    pub fn from_result(r: Result<(Value, Vec<ExecutionError>), GraphQLError>) -> Self {
        Self(r)
    }

    /// Constructs an error response outside of the normal execution flow.
    pub fn error(error: FieldError) -> Self {
        Self(Ok((Value::null(), vec![ExecutionError::at_origin(error)])))
    }

    /// Was the request successful or not?
    ///
    /// Note that there still might be errors in the response even though it's
    /// considered OK: field errors come along with partial data.
    pub fn is_ok(&self) -> bool {
        self.0.is_ok()
    }

    /// Underlying result of the execution.
    pub fn as_result(&self) -> &Result<(Value, Vec<ExecutionError>), GraphQLError> {
        &self.0
    }
}

impl Serialize for GraphQLResponse {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Ok((res, err)) => {
                let mut map = serializer.serialize_map(None)?;

                map.serialize_key("data")?;
                map.serialize_value(res)?;

                if !err.is_empty() {
                    map.serialize_key("errors")?;
                    map.serialize_value(err)?;
                }

                map.end()
            }
            Err(err) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_key("errors")?;
                map.serialize_value(err)?;
                map.end()
            }
        }
    }
}

/// Either a single request or a batch of them.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GraphQLBatchRequest {
    /// A single operation request.
    Single(GraphQLRequest),

    /// A batch operation request.
    ///
    /// Empty batch is considered as invalid value, so cannot be deserialized.
    #[serde(deserialize_with = "deserialize_non_empty_batch")]
    Batch(Vec<GraphQLRequest>),
}

fn deserialize_non_empty_batch<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: de::Deserializer<'de>,
    T: Deserialize<'de>,
{
    use de::Error as _;

    let v = Vec::<T>::deserialize(deserializer)?;
    if v.is_empty() {
        Err(D::Error::invalid_length(
            0,
            &"non-empty batch of GraphQL requests",
        ))
    } else {
        Ok(v)
    }
}

impl GraphQLBatchRequest {
    /// Execute a GraphQL batch request synchronously using the specified
    /// schema and context.
    pub fn execute_sync<Ctx: Sync>(
        &self,
        schema: &SchemaType<Ctx>,
        root_value: &Value,
        context: &Ctx,
    ) -> GraphQLBatchResponse {
        match self {
            Self::Single(req) => {
                GraphQLBatchResponse::Single(req.execute_sync(schema, root_value.clone(), context))
            }
            Self::Batch(reqs) => GraphQLBatchResponse::Batch(
                reqs.iter()
                    .map(|req| req.execute_sync(schema, root_value.clone(), context))
                    .collect(),
            ),
        }
    }

    /// Executes a GraphQL batch request using the specified schema and
    /// context.
    ///
    /// The requests of a batch run concurrently.
    pub async fn execute<Ctx: Sync>(
        &self,
        schema: &SchemaType<Ctx>,
        root_value: &Value,
        context: &Ctx,
    ) -> GraphQLBatchResponse {
        match self {
            Self::Single(req) => {
                let resp = req.execute(schema, root_value.clone(), context).await;
                GraphQLBatchResponse::Single(resp)
            }
            Self::Batch(reqs) => {
                let resps = futures::future::join_all(
                    reqs.iter()
                        .map(|req| req.execute(schema, root_value.clone(), context)),
                )
                .await;
                GraphQLBatchResponse::Batch(resps)
            }
        }
    }

    /// The operation names of the request.
    pub fn operation_names(&self) -> Vec<Option<&str>> {
        match self {
            Self::Single(req) => vec![req.operation_name.as_deref()],
            Self::Batch(reqs) => reqs.iter().map(|r| r.operation_name.as_deref()).collect(),
        }
    }
}

/// Simple wrapper around the results of executing a [`GraphQLBatchRequest`].
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GraphQLBatchResponse {
    /// Result of a single operation in a GraphQL request.
    Single(GraphQLResponse),
    /// Result of a batch operation in a GraphQL request.
    Batch(Vec<GraphQLResponse>),
}

impl GraphQLBatchResponse {
    /// Returns if all the [`GraphQLResponse`]s in this operation are ok.
    pub fn is_ok(&self) -> bool {
        match self {
            Self::Single(resp) => resp.is_ok(),
            Self::Batch(resps) => resps.iter().all(GraphQLResponse::is_ok),
        }
    }
}
