pub(crate) mod hasura_stub;
