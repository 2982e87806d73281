mod arithmetic;
mod explain;
