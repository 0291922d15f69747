mod dice;
mod expr;
mod selection;
